use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;

/// GitURL関連のエラー
#[derive(Debug, Error, PartialEq)]
pub enum GitUrlError {
    #[error("Empty URL")]
    Empty,

    #[error("Missing repository path: {0}")]
    MissingRepoPath(String),
}

/// Git URLの値オブジェクト
///
/// `https://host/group/proj.git`、`git@host:group/proj.git`、
/// ローカルパスのいずれの形式も受け付ける。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitUrl {
    /// 設定ファイルに書かれたままのURL
    url: String,

    /// リポジトリパス（ホスト部分を除いたもの）
    repo_path: String,
}

/// `user@host:path` 形式（scp風のSSH URL）
fn scp_like_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z0-9._-]+@)?([A-Za-z0-9.-]+):([^/].*)$")
            .expect("scp-like url pattern is valid")
    })
}

impl GitUrl {
    /// 新しいGitUrlインスタンスを作成
    pub fn new(url: &str) -> Result<Self, GitUrlError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(GitUrlError::Empty);
        }

        let repo_path = Self::extract_repo_path(trimmed);
        if Self::last_segment(&repo_path).is_none() {
            return Err(GitUrlError::MissingRepoPath(trimmed.to_string()));
        }

        Ok(Self {
            url: trimmed.to_string(),
            repo_path,
        })
    }

    fn extract_repo_path(url: &str) -> String {
        if !url.contains("://") {
            if let Some(captures) = scp_like_pattern().captures(url) {
                // 1文字のホストはWindowsのドライブレター
                if captures[1].len() > 1 {
                    return captures[2].to_string();
                }
            }
        }

        match Url::parse(url) {
            Ok(parsed) if !parsed.cannot_be_a_base() => parsed.path().to_string(),
            _ => url.replace('\\', "/"),
        }
    }

    fn last_segment(repo_path: &str) -> Option<&str> {
        let segment = repo_path.trim_end_matches('/').rsplit('/').next()?;
        let name = segment.strip_suffix(".git").unwrap_or(segment);
        if name.is_empty() || name == "." || name == ".." {
            None
        } else {
            Some(name)
        }
    }

    /// 元のURL文字列を取得
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// リポジトリパスを取得
    pub fn repo_path(&self) -> &str {
        &self.repo_path
    }

    /// リポジトリ名を取得（`.git` サフィックスを除いた最後のパス要素）
    pub fn repo_name(&self) -> &str {
        // new() で検証済み
        Self::last_segment(&self.repo_path).unwrap_or_default()
    }
}

impl fmt::Display for GitUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl TryFrom<&str> for GitUrl {
    type Error = GitUrlError;

    fn try_from(url: &str) -> Result<Self, Self::Error> {
        GitUrl::new(url)
    }
}
