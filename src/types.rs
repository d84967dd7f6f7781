//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

/// シートから読み込んだ行データ
///
/// `rows[0]`がヘッダー行です。各行は末尾の空セルを含まない可変長の
/// セル文字列の列で、行番号はシート上の絶対位置に対応します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SheetRows {
    /// シート名
    pub sheet_name: String,

    /// 行データ（ヘッダー行を含む）
    pub rows: Vec<Vec<String>>,
}

impl SheetRows {
    /// 新しい行データを生成
    pub fn new(sheet_name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            rows,
        }
    }

    /// ヘッダー行を取得
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// ヘッダー行から列名に一致する列インデックスを検索
    ///
    /// 比較は大文字小文字を区別する完全一致で、左から最初に一致した列を返します。
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.header()?.iter().position(|cell| cell == name)
    }

    /// ヘッダー行を除くデータ行の数
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// データ行を(データ行インデックス, 行)の組で走査
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.rows.iter().skip(1).map(Vec::as_slice).enumerate()
    }
}

/// GORファイルの1レコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GorRecord<'a> {
    /// リクエストID（24文字）
    pub request_id: String,

    /// タイムスタンプ（Unixエポックからのナノ秒）
    pub timestamp: i64,

    /// リクエスト本文（前後の空白を除去済み）
    pub body: &'a str,
}

impl GorRecord<'_> {
    /// メタデータ行（`1 <id> <timestamp> 0`、改行なし）
    pub fn metadata_line(&self) -> String {
        format!("1 {} {} 0", self.request_id, self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]]) -> SheetRows {
        SheetRows::new(
            "Sheet1",
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_find_column_exact_match() {
        let rows = sheet(&[&["A", "http请求", "B"]]);
        assert_eq!(rows.find_column("http请求"), Some(1));
        assert_eq!(rows.find_column("A"), Some(0));
    }

    #[test]
    fn test_find_column_is_case_sensitive() {
        let rows = sheet(&[&["Request"]]);
        assert_eq!(rows.find_column("request"), None);
        assert_eq!(rows.find_column("Request "), None);
    }

    #[test]
    fn test_find_column_first_match_wins() {
        let rows = sheet(&[&["x", "dup", "dup"]]);
        assert_eq!(rows.find_column("dup"), Some(1));
    }

    #[test]
    fn test_find_column_without_header() {
        let rows = sheet(&[]);
        assert_eq!(rows.header(), None);
        assert_eq!(rows.find_column("A"), None);
        assert_eq!(rows.data_row_count(), 0);
    }

    #[test]
    fn test_data_rows_skip_header() {
        let rows = sheet(&[&["h"], &["r1"], &[], &["r3"]]);
        let data: Vec<_> = rows.data_rows().collect();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0].0, 0);
        assert_eq!(data[0].1, ["r1".to_string()]);
        assert!(data[1].1.is_empty());
        assert_eq!(rows.data_row_count(), 3);
    }

    #[test]
    fn test_metadata_line() {
        let record = GorRecord {
            request_id: "abcdef012345678901234567".to_string(),
            timestamp: 1_700_000_000_000_000_000,
            body: "GET / HTTP/1.1",
        };
        assert_eq!(
            record.metadata_line(),
            "1 abcdef012345678901234567 1700000000000000000 0"
        );
    }
}
