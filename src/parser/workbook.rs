//! Workbook Reader
//!
//! calamineのラッパーとして、ワークブックを開き、シートを選択し、
//! 行データを取り出す。

use calamine::{open_workbook_auto_from_rs, Reader, Sheets};
use std::io::{Cursor, Read};
use tracing::debug;

use crate::api::SheetSelector;
use crate::error::ExcelToGorError;
use crate::formatter::CellFormatter;
use crate::security::SecurityConfig;
use crate::types::SheetRows;

/// ワークブックリーダー
///
/// xlsx / xlsm / xlsb / xls / ods のいずれの形式もcalamineの自動判別で開きます。
pub(crate) struct WorkbookReader {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
    /// セルフォーマッター
    formatter: CellFormatter,
}

impl WorkbookReader {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートのバイト列を読み込むためのリーダー
    /// * `security` - 入力サイズ制限
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookReader)` - ワークブックの読み込みに成功した場合
    /// * `Err(ExcelToGorError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(ExcelToGorError::Parse)` - ワークブックとして解析できない場合
    pub fn open<R: Read>(reader: R, security: &SecurityConfig) -> Result<Self, ExcelToGorError> {
        // 上限+1バイトまで読めば超過を検出できる
        let limit = security.max_input_file_size.saturating_add(1);
        let mut buffer = Vec::new();
        let bytes_read = reader.take(limit).read_to_end(&mut buffer)?;
        security.check_input_size(bytes_read as u64)?;

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;

        Ok(Self {
            workbook,
            formatter: CellFormatter::new(),
        })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシート名を決定
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(ExcelToGorError::NoSheet)` - ワークブックにシートがない場合
    /// * `Err(ExcelToGorError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, ExcelToGorError> {
        let all_sheet_names = self.sheet_names();
        if all_sheet_names.is_empty() {
            return Err(ExcelToGorError::NoSheet);
        }

        match selector {
            SheetSelector::First => Ok(all_sheet_names[0].clone()),

            SheetSelector::Index(index) => {
                all_sheet_names.get(*index).cloned().ok_or_else(|| {
                    ExcelToGorError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index,
                        all_sheet_names.len()
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(ExcelToGorError::Config(format!(
                        "Sheet '{}' not found",
                        name
                    )));
                }
                Ok(name.clone())
            }
        }
    }

    /// シートのすべての行をセル文字列として読み込む
    ///
    /// calamineのセル範囲は最初の非空セルから始まるため、範囲の開始位置の分だけ
    /// 空の行・セルを補い、行番号・列番号をシート上の絶対位置に揃えます。
    /// 各行の末尾の空セルは取り除きます。
    pub fn read_rows(&mut self, sheet_name: &str) -> Result<SheetRows, ExcelToGorError> {
        let range = self.workbook.worksheet_range(sheet_name)?;

        let Some((start_row, start_col)) = range.start() else {
            debug!(sheet = sheet_name, "sheet is empty");
            return Ok(SheetRows::new(sheet_name, Vec::new()));
        };

        let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];

        for row in range.rows() {
            let mut cells = vec![String::new(); start_col as usize];
            cells.extend(row.iter().map(|cell| self.formatter.format_cell(cell)));

            while cells.last().is_some_and(|cell| cell.is_empty()) {
                cells.pop();
            }
            rows.push(cells);
        }

        debug!(sheet = sheet_name, rows = rows.len(), "read sheet rows");
        Ok(SheetRows::new(sheet_name, rows))
    }
}

// ワークブックを使うテストは実際のXLSXファイルが必要なため、
// 統合テスト（tests/）で実装します。
