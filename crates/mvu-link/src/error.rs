//! mvu-link エラー型

use std::io;

/// バイトチャンネルのエラー
#[derive(Debug)]
pub enum LinkError {
    /// トランスポートのオープンに失敗（致命的、リトライしない）
    PortUnavailable {
        /// 開けなかったポート名
        port: String,
        /// 下層からの理由
        reason: String,
    },
    /// 設定されたタイムアウト内に 1 グループ読めなかった
    ReadTimeout {
        /// タイムアウトまでに届いた端数バイト数
        received: usize,
    },
    /// その他の I/O エラー
    Io(io::Error),
}

impl core::fmt::Display for LinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinkError::PortUnavailable { port, reason } => {
                write!(f, "Unable to open {}: {}", port, reason)
            }
            LinkError::ReadTimeout { received } => {
                write!(f, "Read timed out with {} byte(s) of a partial group", received)
            }
            LinkError::Io(err) => write!(f, "Link I/O error: {}", err),
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LinkError {
    fn from(err: io::Error) -> Self {
        // ReadTimeout への変換は read_group 側だけが行う。書き込み経路の
        // タイムアウトを読み出しタイムアウトに見せてはいけない
        LinkError::Io(err)
    }
}
