//! GOR Writer
//!
//! レコードと区切りブロックを書き出し、書き込み済みレコード数を管理する。

use std::io::{self, Write};

use super::SEPARATOR;
use crate::api::SeparatorPolicy;
use crate::error::ExcelToGorError;
use crate::types::GorRecord;

/// GORファイルライター
///
/// 書き込みに失敗した場合は、それまでに書き込みを完了したレコード数を
/// `ExcelToGorError::Write`に含めて返します。
pub(crate) struct GorWriter<W: Write> {
    writer: W,
    policy: SeparatorPolicy,
    written: usize,
}

impl<W: Write> GorWriter<W> {
    /// 新しいライターを生成
    pub fn new(writer: W, policy: SeparatorPolicy) -> Self {
        Self {
            writer,
            policy,
            written: 0,
        }
    }

    /// レコードを1件書き込む
    ///
    /// # 引数
    ///
    /// * `record` - 書き込むレコード
    /// * `is_last_row` - レコードがシートの最終行から作られたかどうか
    ///   （`SeparatorPolicy::SourceRows`でのみ使用）
    ///
    /// レコードごとに出力をフラッシュし、下位のライターへ届いた時点で
    /// 書き込み済みとして数えます。
    pub fn write_record(
        &mut self,
        record: &GorRecord<'_>,
        is_last_row: bool,
    ) -> Result<(), ExcelToGorError> {
        if let Err(source) = self.write_record_lines(record, is_last_row) {
            return Err(self.write_error(source));
        }
        self.written += 1;
        Ok(())
    }

    /// 末尾の区切りブロックを書き込み、出力をフラッシュする
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 書き込んだレコードの総数
    pub fn finish(mut self) -> Result<usize, ExcelToGorError> {
        let result = self
            .writer
            .write_all(SEPARATOR.as_bytes())
            .and_then(|()| self.writer.flush());
        match result {
            Ok(()) => Ok(self.written),
            Err(source) => Err(self.write_error(source)),
        }
    }

    fn write_record_lines(&mut self, record: &GorRecord<'_>, is_last_row: bool) -> io::Result<()> {
        if self.policy == SeparatorPolicy::WrittenRecords && self.written > 0 {
            self.writer.write_all(SEPARATOR.as_bytes())?;
        }

        writeln!(self.writer, "{}", record.metadata_line())?;
        writeln!(self.writer, "{}", record.body)?;

        if self.policy == SeparatorPolicy::SourceRows && !is_last_row {
            self.writer.write_all(SEPARATOR.as_bytes())?;
        }
        self.writer.flush()
    }

    fn write_error(&self, source: io::Error) -> ExcelToGorError {
        ExcelToGorError::Write {
            written: self.written,
            source,
        }
    }
}
