//! Output Format Module
//!
//! GORファイル形式での出力を提供するモジュール。
//!
//! # 出力形式
//!
//! ```text
//! 1 <24文字のリクエストID> <ナノ秒タイムスタンプ> 0
//! <HTTPリクエスト本文>
//!
//!
//! 🐵🙈🙉
//! ```
//!
//! 区切りブロックの配置は`SeparatorPolicy`に従い、出力の末尾には常に
//! 区切りブロックが1つ追加されます。

mod writer;

pub(crate) use writer::GorWriter;

/// レコード間の区切りブロック（空行2つ、3つの絵文字、改行）
pub const SEPARATOR: &str = "\n\n🐵🙈🙉\n";
