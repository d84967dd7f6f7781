//! Builder Module
//!
//! Fluent Builder APIを提供し、`Extractor`インスタンスを段階的に構築する。

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::api::{RequestIdFormat, SeparatorPolicy, SheetSelector};
use crate::error::ExcelToGorError;
use crate::output::GorWriter;
use crate::parser::WorkbookReader;
use crate::security::SecurityConfig;
use crate::stamp::{RecordStamper, SystemStamper};
use crate::types::{GorRecord, SheetRows};

/// HTTPリクエスト列のデフォルト列名
pub const DEFAULT_COLUMN: &str = "http请求";

/// 抽出処理の設定を保持する内部構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExtractionConfig {
    /// HTTPリクエストを含む列の名前
    pub column: String,

    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 区切りブロックの出力方式
    pub separator_policy: SeparatorPolicy,

    /// リクエストIDの形式
    pub request_id_format: RequestIdFormat,

    /// セキュリティ設定
    pub security: SecurityConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            column: DEFAULT_COLUMN.to_string(),
            sheet_selector: SheetSelector::First,
            separator_policy: SeparatorPolicy::SourceRows,
            request_id_format: RequestIdFormat::Hyphenated,
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2gor::{ExtractorBuilder, SeparatorPolicy, SheetSelector};
///
/// # fn main() -> Result<(), xlsx2gor::ExcelToGorError> {
/// let extractor = ExtractorBuilder::new()
///     .with_column("request")
///     .with_sheet_selector(SheetSelector::Name("prod".to_string()))
///     .with_separator_policy(SeparatorPolicy::WrittenRecords)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ExtractorBuilder {
    /// 内部設定（構築中）
    config: ExtractionConfig,
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 列名: `http请求`
    /// - シート選択: 最初のシート
    /// - 区切り方式: `SeparatorPolicy::SourceRows`
    /// - リクエストID: `RequestIdFormat::Hyphenated`
    /// - 入力サイズ上限: 2GB
    pub fn new() -> Self {
        Self::default()
    }

    /// HTTPリクエストを含む列の名前を指定する
    ///
    /// ヘッダー行のセルと大文字小文字を区別して完全一致で比較されます。
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.config.column = column.into();
        self
    }

    /// 抽出対象のシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 区切りブロックの出力方式を指定する
    pub fn with_separator_policy(mut self, policy: SeparatorPolicy) -> Self {
        self.config.separator_policy = policy;
        self
    }

    /// リクエストIDの形式を指定する
    pub fn with_request_id_format(mut self, format: RequestIdFormat) -> Self {
        self.config.request_id_format = format;
        self
    }

    /// 入力ファイルサイズの上限（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Extractor`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ExcelToGorError::Config(String)`: 設定の検証に失敗した場合
    ///   * 列名が空
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Extractor, ExcelToGorError> {
        if self.config.column.is_empty() {
            return Err(ExcelToGorError::Config(
                "Column name must not be empty".to_string(),
            ));
        }

        if self.config.security.max_input_file_size == 0 {
            return Err(ExcelToGorError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Extractor::new(self.config))
    }
}

/// 抽出処理のファサード
///
/// スプレッドシートの1列からHTTPリクエストを取り出し、GORファイルとして書き出します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2gor::ExtractorBuilder;
///
/// # fn main() -> Result<(), xlsx2gor::ExcelToGorError> {
/// let extractor = ExtractorBuilder::new().build()?;
/// let count = extractor.extract("requests.xlsx", "requests.gor")?;
/// println!("wrote {} requests", count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Extractor {
    /// 抽出設定
    config: ExtractionConfig,
}

impl Extractor {
    pub(crate) fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// 対象の列名
    pub fn column(&self) -> &str {
        &self.config.column
    }

    /// スプレッドシートファイルを読み込み、GORファイルを書き出す
    ///
    /// 列名が見つからない場合は出力ファイルを作成しません。
    /// 既存の出力ファイルは上書きされます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 書き込んだレコード数
    /// * `Err(ExcelToGorError)` - エラーが発生した場合。書き込み中のエラーには
    ///   それまでに書き込んだレコード数が含まれます
    pub fn extract(
        &self,
        excel_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<usize, ExcelToGorError> {
        let excel_path = excel_path.as_ref();
        let output_path = output_path.as_ref();

        let input = File::open(excel_path).map_err(|source| ExcelToGorError::SourceOpen {
            path: excel_path.to_path_buf(),
            source,
        })?;
        let rows = self.load_rows(input)?;
        let column = self.resolve_column(&rows)?;

        let output = File::create(output_path).map_err(|source| ExcelToGorError::OutputCreate {
            path: output_path.to_path_buf(),
            source,
        })?;

        let count = self.write_records(
            &rows,
            column,
            BufWriter::new(output),
            &mut SystemStamper::new(self.config.request_id_format),
        )?;

        info!(count, output = %output_path.display(), "wrote GOR file");
        Ok(count)
    }

    /// 任意のリーダーから読み込み、任意のライターへ書き出す
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use xlsx2gor::ExtractorBuilder;
    ///
    /// # fn main() -> Result<(), xlsx2gor::ExcelToGorError> {
    /// let extractor = ExtractorBuilder::new().build()?;
    /// let input = File::open("requests.xlsx")?;
    /// extractor.extract_from_reader(input, std::io::stdout())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract_from_reader<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<usize, ExcelToGorError> {
        self.extract_with_stamper(
            input,
            output,
            &mut SystemStamper::new(self.config.request_id_format),
        )
    }

    /// リクエストIDとタイムスタンプの供給元を指定して抽出する
    ///
    /// 出力を決定的にしたい場合（テストなど）に使用します。
    pub fn extract_with_stamper<R: Read, W: Write, S: RecordStamper>(
        &self,
        input: R,
        output: W,
        stamper: &mut S,
    ) -> Result<usize, ExcelToGorError> {
        let rows = self.load_rows(input)?;
        let column = self.resolve_column(&rows)?;
        self.write_records(&rows, column, BufWriter::new(output), stamper)
    }

    /// GORテキストを文字列として返す
    pub fn extract_to_string<R: Read>(&self, input: R) -> Result<String, ExcelToGorError> {
        let mut buffer = Vec::new();
        self.extract_from_reader(input, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            ExcelToGorError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }

    fn load_rows<R: Read>(&self, input: R) -> Result<SheetRows, ExcelToGorError> {
        let mut reader = WorkbookReader::open(input, &self.config.security)?;
        let sheet_name = reader.select_sheet(&self.config.sheet_selector)?;
        reader.read_rows(&sheet_name)
    }

    fn resolve_column(&self, rows: &SheetRows) -> Result<usize, ExcelToGorError> {
        if rows.header().is_none() {
            return Err(ExcelToGorError::EmptySheet {
                sheet: rows.sheet_name.clone(),
            });
        }

        let column = rows.find_column(&self.config.column).ok_or_else(|| {
            ExcelToGorError::ColumnNotFound {
                column: self.config.column.clone(),
            }
        })?;

        info!(
            sheet = %rows.sheet_name,
            column = %self.config.column,
            index = column,
            "resolved request column"
        );
        Ok(column)
    }

    fn write_records<W: Write, S: RecordStamper>(
        &self,
        rows: &SheetRows,
        column: usize,
        output: W,
        stamper: &mut S,
    ) -> Result<usize, ExcelToGorError> {
        let mut writer = GorWriter::new(output, self.config.separator_policy);
        let last_data_row = rows.data_row_count().saturating_sub(1);

        for (index, row) in rows.data_rows() {
            let body = row.get(column).map(|cell| cell.trim()).unwrap_or_default();
            if body.is_empty() {
                debug!(row = index + 1, "skipping row without request");
                continue;
            }

            let record = GorRecord {
                request_id: stamper.request_id(),
                timestamp: stamper.timestamp_nanos(),
                body,
            };
            writer.write_record(&record, index == last_data_row)?;
        }

        writer.finish()
    }
}

/// デフォルト設定で`excel_path`の`column`列を`output_path`へ書き出す
///
/// `ExtractorBuilder::new().with_column(column).build()?.extract(...)`の短縮形です。
pub fn extract(
    excel_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    column: &str,
) -> Result<usize, ExcelToGorError> {
    ExtractorBuilder::new()
        .with_column(column)
        .build()?
        .extract(excel_path, output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::SEPARATOR;

    /// 連番のIDと固定のタイムスタンプを返すスタンパー
    struct SequenceStamper {
        next: usize,
    }

    impl RecordStamper for SequenceStamper {
        fn request_id(&mut self) -> String {
            self.next += 1;
            format!("{:024}", self.next)
        }

        fn timestamp_nanos(&mut self) -> i64 {
            1_000
        }
    }

    fn sheet(rows: &[&[&str]]) -> SheetRows {
        SheetRows::new(
            "Sheet1",
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn render(extractor: &Extractor, rows: &SheetRows) -> (usize, String) {
        let column = extractor.resolve_column(rows).unwrap();
        let mut buffer = Vec::new();
        let count = extractor
            .write_records(rows, column, &mut buffer, &mut SequenceStamper { next: 0 })
            .unwrap();
        (count, String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn test_extractor_builder_new() {
        let builder = ExtractorBuilder::new();
        assert_eq!(builder.config.column, "http请求");
        assert_eq!(builder.config.sheet_selector, SheetSelector::First);
        assert_eq!(builder.config.separator_policy, SeparatorPolicy::SourceRows);
        assert_eq!(
            builder.config.request_id_format,
            RequestIdFormat::Hyphenated
        );
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = ExtractorBuilder::new()
            .with_column("req")
            .with_sheet_selector(SheetSelector::Index(2))
            .with_separator_policy(SeparatorPolicy::WrittenRecords)
            .with_request_id_format(RequestIdFormat::Simple)
            .with_max_input_size(1024);

        assert_eq!(builder.config.column, "req");
        assert_eq!(builder.config.sheet_selector, SheetSelector::Index(2));
        assert_eq!(
            builder.config.separator_policy,
            SeparatorPolicy::WrittenRecords
        );
        assert_eq!(builder.config.request_id_format, RequestIdFormat::Simple);
        assert_eq!(builder.config.security.max_input_file_size, 1024);
    }

    #[test]
    fn test_build_with_empty_column() {
        match ExtractorBuilder::new().with_column("").build() {
            Err(ExcelToGorError::Config(msg)) => assert!(msg.contains("Column name")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_build_with_zero_max_input_size() {
        let result = ExtractorBuilder::new().with_max_input_size(0).build();
        assert!(matches!(result, Err(ExcelToGorError::Config(_))));
    }

    #[test]
    fn test_skips_empty_cells_and_trims() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        let rows = sheet(&[
            &["A", "http请求", "B"],
            &["a", "  GET /x HTTP/1.1  ", "b"],
            &["a", "   ", "b"],
            &["a"],
        ]);

        let (count, output) = render(&extractor, &rows);
        assert_eq!(count, 1);
        assert!(output.starts_with("1 000000000000000000000001 1000 0\nGET /x HTTP/1.1\n"));
        // 最終行がスキップされたため、区切りが2つ続く
        assert_eq!(output.matches(SEPARATOR).count(), 2);
    }

    #[test]
    fn test_source_rows_separator_count_when_last_row_written() {
        let extractor = ExtractorBuilder::new().with_column("req").build().unwrap();
        let rows = sheet(&[&["req"], &["GET /1"], &["GET /2"], &["GET /3"]]);

        let (count, output) = render(&extractor, &rows);
        assert_eq!(count, 3);
        assert_eq!(output.matches(SEPARATOR).count(), 3);
        assert!(output.ends_with(&format!("GET /3\n{}", SEPARATOR)));
    }

    #[test]
    fn test_written_records_separator_count() {
        let extractor = ExtractorBuilder::new()
            .with_column("req")
            .with_separator_policy(SeparatorPolicy::WrittenRecords)
            .build()
            .unwrap();
        let rows = sheet(&[&["req"], &["GET /1"], &[""], &["GET /2"], &[""]]);

        let (count, output) = render(&extractor, &rows);
        assert_eq!(count, 2);
        assert_eq!(output.matches(SEPARATOR).count(), 2);
        assert!(output.ends_with(&format!("GET /2\n{}", SEPARATOR)));
    }

    #[test]
    fn test_header_only_sheet_writes_trailing_separator() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        let rows = sheet(&[&["http请求"]]);

        let (count, output) = render(&extractor, &rows);
        assert_eq!(count, 0);
        assert_eq!(output, SEPARATOR);
    }

    #[test]
    fn test_resolve_column_not_found() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        let rows = sheet(&[&["A", "B"]]);

        match extractor.resolve_column(&rows) {
            Err(ExcelToGorError::ColumnNotFound { column }) => assert_eq!(column, "http请求"),
            other => panic!("Expected ColumnNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_column_empty_sheet() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        let rows = sheet(&[]);

        assert!(matches!(
            extractor.resolve_column(&rows),
            Err(ExcelToGorError::EmptySheet { .. })
        ));
    }

    proptest::proptest! {
        #[test]
        fn prop_body_is_trimmed_and_metadata_well_formed(
            body in "[A-Za-z0-9/ ]{0,24}",
            lead in "[ \t\n]{0,3}",
            trail in "[ \t\n]{0,3}",
        ) {
            let extractor = ExtractorBuilder::new().with_column("req").build().unwrap();
            let cell = format!("{}{}{}", lead, body, trail);
            let rows = sheet(&[&["req"], &[cell.as_str()]]);

            let (count, output) = render(&extractor, &rows);
            let trimmed = body.trim();
            if trimmed.is_empty() {
                proptest::prop_assert_eq!(count, 0);
                proptest::prop_assert_eq!(output, SEPARATOR);
            } else {
                proptest::prop_assert_eq!(count, 1);
                let expected = format!("1 000000000000000000000001 1000 0\n{}\n{}", trimmed, SEPARATOR);
                proptest::prop_assert_eq!(output, expected);
            }
        }
    }

    #[test]
    fn test_extract_to_string_with_invalid_input() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        let result = extractor.extract_to_string(std::io::Cursor::new(b"not a workbook".to_vec()));
        assert!(matches!(result, Err(ExcelToGorError::Parse(_))));
    }

    #[test]
    fn test_extract_missing_input_file() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        match extractor.extract("does/not/exist.xlsx", "unused.gor") {
            Err(ExcelToGorError::SourceOpen { path, .. }) => {
                assert_eq!(path, Path::new("does/not/exist.xlsx"));
            }
            other => panic!("Expected SourceOpen, got {:?}", other),
        }
        assert!(!Path::new("unused.gor").exists());
    }
}
