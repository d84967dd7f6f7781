//! Formatter Module
//!
//! calamineのセル値を表示用テキストに変換するモジュール。
//! HTTPリクエスト列は通常文字列セルですが、ヘッダー行や他の列には数値や日付が
//! 含まれることがあるため、すべての型を一貫したテキストに変換します。

use std::borrow::Cow;

use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// セルフォーマッター
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug, Default)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// セル値をテキストに変換
    ///
    /// # 変換規則
    ///
    /// - 文字列: OOXMLエスケープ（`_x000D_`など）を復号した文字列
    /// - 整数・浮動小数点数: 最短の10進表記（`1.0` → `1`）
    /// - 論理値: `TRUE` / `FALSE`
    /// - エラー値: Excelのエラーコード（例: `#DIV/0!`）
    /// - 日時: ISO 8601形式（シリアル値として解釈）
    /// - 空セル: 空文字列
    pub fn format_cell(&self, cell: &Data) -> String {
        match cell {
            Data::String(s) => decode_escapes(s).into_owned(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => f.to_string(),
            Data::Bool(true) => "TRUE".to_string(),
            Data::Bool(false) => "FALSE".to_string(),
            Data::Error(e) => e.to_string(),
            Data::DateTime(dt) => self
                .date_formatter
                .format(dt.as_f64())
                .unwrap_or_else(|| dt.as_f64().to_string()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            Data::Empty => String::new(),
        }
    }
}

/// OOXMLの`_xHHHH_`エスケープを復号する
///
/// xlsxでは制御文字（CRなど）が`_x000D_`のように格納されます。
/// `_x005F_`はリテラルのアンダースコアを表すため、`_x005F_x000D_`は
/// `_x000D_`という文字列に復号されます。不正な符号位置はそのまま残します。
fn decode_escapes(text: &str) -> Cow<'_, str> {
    if !text.contains("_x") {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut decoded = String::with_capacity(text.len());
    let mut start = 0;
    let mut i = 0;
    while i + 7 <= bytes.len() {
        if bytes[i] == b'_' && bytes[i + 1] == b'x' && bytes[i + 6] == b'_' {
            let hex = &text[i + 2..i + 6];
            if hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                if let Some(c) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
                    decoded.push_str(&text[start..i]);
                    decoded.push(c);
                    i += 7;
                    start = i;
                    continue;
                }
            }
        }
        i += 1;
    }
    decoded.push_str(&text[start..]);
    Cow::Owned(decoded)
}

/// 日付フォーマッター
///
/// Excelのシリアル日付値（1900年システム）をISO 8601文字列に変換します。
#[derive(Debug, Default)]
pub(crate) struct DateFormatter;

impl DateFormatter {
    /// Excelが扱える最大のシリアル値（9999-12-31）
    const MAX_SERIAL: f64 = 2_958_466.0;

    /// 日付値をフォーマット
    ///
    /// 時刻部分が0の場合は`YYYY-MM-DD`、それ以外は`YYYY-MM-DD HH:MM:SS`を返します。
    /// 範囲外のシリアル値の場合は`None`を返します。
    ///
    /// Excelは1900-02-29（シリアル値60）を実在する日として数えるため、
    /// シリアル値61以降は1899-12-30起算、それより前は1899-12-31起算で計算します。
    /// シリアル値60は1900-03-01として扱われます。
    pub fn format(&self, serial_value: f64) -> Option<String> {
        if !(0.0..Self::MAX_SERIAL).contains(&serial_value) {
            return None;
        }

        let epoch_day = if serial_value < 61.0 { 31 } else { 30 };
        let epoch = NaiveDate::from_ymd_opt(1899, 12, epoch_day)?.and_hms_opt(0, 0, 0)?;
        let millis = (serial_value * 86_400_000.0).round() as i64;
        let datetime: NaiveDateTime = epoch.checked_add_signed(Duration::milliseconds(millis))?;

        let formatted = if datetime.num_seconds_from_midnight() == 0 {
            datetime.format("%Y-%m-%d").to_string()
        } else {
            datetime.format("%Y-%m-%d %H:%M:%S").to_string()
        };
        Some(formatted)
    }
}
