//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// シート選択方式
///
/// リクエストを抽出するシートを選択する方法を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 最初のシート（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("requests".to_string())`
    Name(String),
}

/// レコード間の区切りブロックの出力方式
///
/// 区切りブロック（`\n\n🐵🙈🙉\n`）は常に出力の末尾に1つ追加されます。
/// この列挙型は、それに加えてレコードの後ろに区切りを置くかどうかの判定基準を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SeparatorPolicy {
    /// シートの最終行から作られたレコード以外の後ろに区切りを出力（デフォルト）
    ///
    /// 既存のGORファイル生成ツールとバイト単位で互換な出力になります。
    /// シート末尾の行が空セルでスキップされた場合、最後のレコードの後ろには
    /// 区切りが2つ続きます。
    ///
    /// # 出力例（末尾行がスキップされた場合）
    ///
    /// ```text
    /// 1 <id> <ts> 0
    /// GET /x
    ///
    ///
    /// 🐵🙈🙉
    ///
    ///
    /// 🐵🙈🙉
    /// ```
    #[default]
    SourceRows,

    /// 書き込まれたレコード同士の間にのみ区切りを出力
    ///
    /// N件のレコードに対して区切りはちょうどN個（N = 0の場合は末尾の1個）になり、
    /// スキップされた行の位置に影響されません。
    WrittenRecords,
}

/// リクエストIDの生成形式
///
/// どちらの形式もランダムなUUID (v4) の文字列表現の先頭24文字を使用します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum RequestIdFormat {
    /// ハイフン付き形式の先頭24文字（デフォルト）
    ///
    /// 例: `67e55044-10b1-426f-9247-`
    #[default]
    Hyphenated,

    /// 32桁16進数形式の先頭24文字
    ///
    /// 例: `67e5504410b1426f9247bb68`
    Simple,
}

impl RequestIdFormat {
    /// リクエストIDの長さ（文字数）
    pub const LEN: usize = 24;
}
