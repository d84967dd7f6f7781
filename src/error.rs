//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;
use thiserror::Error;

/// xlsx2gorクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、列の解決、GORファイルの書き出し中に発生する
/// すべてのエラーを統一的に扱います。いずれのエラーも変換処理を中断させ、
/// 内部でのリトライは行いません。
///
/// # エラーの種類
///
/// - 入力側: `SourceOpen`, `Io`, `Parse`, `NoSheet`, `EmptySheet`, `SecurityViolation`
/// - 設定: `Config`
/// - 列の解決: `ColumnNotFound`
/// - 出力側: `OutputCreate`, `Write`
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2gor::{ExcelToGorError, ExtractorBuilder};
///
/// let extractor = ExtractorBuilder::new().build().unwrap();
/// match extractor.extract("requests.xlsx", "requests.gor") {
///     Ok(count) => println!("{} requests", count),
///     Err(ExcelToGorError::ColumnNotFound { column }) => {
///         eprintln!("no column named {}", column);
///     }
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ExcelToGorError {
    /// 入力ファイルを開けなかったエラー
    #[error("failed to open Excel file '{}': {source}", .path.display())]
    SourceOpen {
        /// 入力ファイルのパス
        path: PathBuf,
        /// 元のI/Oエラー
        source: std::io::Error,
    },

    /// 入力の読み込み中に発生したI/Oエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// calamineクレートがワークブックやシートを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// ワークブックにシートが1つも存在しない
    #[error("workbook contains no sheets")]
    NoSheet,

    /// シートにヘッダー行が存在しない
    #[error("sheet '{sheet}' has no header row")]
    EmptySheet {
        /// シート名
        sheet: String,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtractorBuilder::build()`時の検証や、存在しないシートを指定した場合に
    /// 発生します。
    #[error("configuration error: {0}")]
    Config(String),

    /// 指定された列名がヘッダー行に見つからない
    #[error("column '{column}' not found in the Excel file")]
    ColumnNotFound {
        /// 検索した列名
        column: String,
    },

    /// 出力ファイルを作成できなかったエラー
    #[error("failed to create output file '{}': {source}", .path.display())]
    OutputCreate {
        /// 出力ファイルのパス
        path: PathBuf,
        /// 元のI/Oエラー
        source: std::io::Error,
    },

    /// 出力への書き込み中に発生したエラー
    ///
    /// `written`にはエラー発生までに書き込みを完了したレコード数が入ります。
    /// 途中まで書き込まれた出力はロールバックされません。
    #[error("failed to write to output file after {written} records: {source}")]
    Write {
        /// 書き込み済みのレコード数
        written: usize,
        /// 元のI/Oエラー
        source: std::io::Error,
    },

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限を超えた場合に発生します。
    #[error("security violation: {0}")]
    SecurityViolation(String),
}

impl ExcelToGorError {
    /// エラー発生までに書き込まれたレコード数
    ///
    /// 書き込みエラー以外では、出力が開始される前に失敗しているため0を返します。
    pub fn records_written(&self) -> usize {
        match self {
            ExcelToGorError::Write { written, .. } => *written,
            _ => 0,
        }
    }
}
