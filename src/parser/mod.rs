//! Parser Module
//!
//! calamineを使用したスプレッドシート読み込みの実装。
//! 選択したシートの行をセル文字列の列として取り出します。

mod workbook;

pub(crate) use workbook::WorkbookReader;
