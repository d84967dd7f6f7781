//! Stamp Module
//!
//! レコードごとのリクエストIDとタイムスタンプを供給するモジュール。
//! 乱数源と壁時計は`RecordStamper`として抽出処理に渡されるため、
//! テストでは固定値を返す実装に差し替えられます。

use chrono::Utc;
use uuid::Uuid;

use crate::api::RequestIdFormat;

/// リクエストIDとタイムスタンプの供給元
pub trait RecordStamper {
    /// 新しいリクエストID（24文字）を生成
    fn request_id(&mut self) -> String;

    /// 現在時刻（Unixエポックからのナノ秒）を取得
    fn timestamp_nanos(&mut self) -> i64;
}

/// ランダムUUIDとシステム時計を使用する標準のスタンパー
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemStamper {
    format: RequestIdFormat,
}

impl SystemStamper {
    /// 指定したID形式でスタンパーを生成
    pub fn new(format: RequestIdFormat) -> Self {
        Self { format }
    }
}

impl RecordStamper for SystemStamper {
    fn request_id(&mut self) -> String {
        let uuid = Uuid::new_v4();
        let mut id = match self.format {
            RequestIdFormat::Hyphenated => uuid.hyphenated().to_string(),
            RequestIdFormat::Simple => uuid.simple().to_string(),
        };
        id.truncate(RequestIdFormat::LEN);
        id
    }

    fn timestamp_nanos(&mut self) -> i64 {
        // i64のナノ秒は2262年で飽和する
        Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
    }
}
