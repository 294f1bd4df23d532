use serde::{Deserialize, Serialize};

use crate::common::error::MassGitError;
use crate::common::result::MassGitResult;
use crate::domain::value_objects::git_url::GitUrl;

/// 設定ファイルに書かれたリポジトリエントリ
///
/// `url` 以外は省略可能。`url` の欠落は読み込み時に検証する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    /// クローン元のURL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// ベースディレクトリからの相対パス
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// デフォルトブランチ名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// 設定ファイルのトップレベル構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfigFile {
    /// リポジトリエントリのリスト
    pub git: Vec<RepositoryEntry>,
}

/// 管理対象のリポジトリ1件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    /// ベースディレクトリからの相対パス（未指定ならURLから導出済み）
    pub directory: String,

    /// クローン元のURL
    pub url: String,

    /// 対象ブランチ名（未指定の場合は `None`、ダウンロード時に現在のブランチで補完される）
    pub branch: Option<String>,
}

impl RepositoryRecord {
    /// 新しいRepositoryRecordインスタンスを作成
    pub fn new(directory: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            url: url.into(),
            branch: None,
        }
    }

    /// ブランチを設定
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// 設定ファイルのエントリから作成する
    ///
    /// `index` はエラーメッセージ用のエントリ番号。
    pub fn from_entry(index: usize, entry: RepositoryEntry) -> MassGitResult<Self> {
        let url = non_empty(entry.url).ok_or_else(|| MassGitError::missing_url_field(index))?;

        let directory = match non_empty(entry.dir) {
            Some(dir) => dir,
            None => GitUrl::new(&url)
                .map_err(|_| MassGitError::invalid_repository_url(&url))?
                .repo_name()
                .to_string(),
        };

        Ok(Self {
            directory,
            url,
            branch: non_empty(entry.branch),
        })
    }

    /// ブランチが確定しているか
    pub fn has_branch(&self) -> bool {
        self.branch.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// セッション中に扱うリポジトリの順序付きコレクション
///
/// 設定ファイルでの順序がそのまま表示・操作の順序になる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    records: Vec<RepositoryRecord>,
}

impl Registry {
    pub fn new(records: Vec<RepositoryRecord>) -> Self {
        Self { records }
    }

    /// 設定ファイルの内容から作成する
    pub fn from_config(config: RepositoryConfigFile) -> MassGitResult<Self> {
        let records = config
            .git
            .into_iter()
            .enumerate()
            .map(|(index, entry)| RepositoryRecord::from_entry(index, entry))
            .collect::<MassGitResult<Vec<_>>>()?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RepositoryRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, RepositoryRecord> {
        self.records.iter_mut()
    }

    /// 重複しているディレクトリ名を返す
    pub fn duplicate_directories(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for record in &self.records {
            if !seen.insert(record.directory.as_str())
                && !duplicates.contains(&record.directory.as_str())
            {
                duplicates.push(record.directory.as_str());
            }
        }
        duplicates
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a RepositoryRecord;
    type IntoIter = std::slice::Iter<'a, RepositoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
