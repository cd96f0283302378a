//! mvu-session エラー型

use mvu_frame::FrameError;
use mvu_link::LinkError;

/// 1 交換のエラー
#[derive(Debug)]
pub enum SessionError {
    /// エンコード時の検証エラー（1 バイトも送信されていない）
    Frame(FrameError),
    /// バイトチャンネルのエラー
    Link(LinkError),
    /// レスポンスがタイムアウトまでに完成しなかった
    ReadTimeout {
        /// 未充填のまま残ったスロットのインデックス
        missing: Vec<usize>,
    },
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::Frame(e) => write!(f, "Encode failed: {}", e),
            SessionError::Link(e) => write!(f, "Link failed: {}", e),
            SessionError::ReadTimeout { missing } => {
                write!(f, "Response incomplete at timeout, missing slots {:?}", missing)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Link(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FrameError> for SessionError {
    fn from(err: FrameError) -> Self {
        SessionError::Frame(err)
    }
}

impl From<LinkError> for SessionError {
    fn from(err: LinkError) -> Self {
        SessionError::Link(err)
    }
}
