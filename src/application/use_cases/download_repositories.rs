use tracing::{debug, info, warn};

use crate::common::result::MassGitResult;
use crate::domain::entities::repository::Registry;
use crate::infrastructure::process::CommandRunner;
use crate::infrastructure::scm::GitScm;

/// ダウンロード処理の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadResult {
    /// 新規クローンしたリポジトリ（ディレクトリ名）
    pub cloned: Vec<String>,

    /// 既にローカルに存在したリポジトリ
    pub existing: Vec<String>,

    /// 現在のブランチで補完したリポジトリ
    pub branches_detected: Vec<String>,

    /// クローン後もディレクトリが存在しなかったリポジトリ
    pub missing: Vec<String>,
}

impl DownloadResult {
    pub fn is_success(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.cloned.len() + self.existing.len() + self.missing.len()
    }
}

/// 設定されたリポジトリをローカルに揃えるユースケース
pub struct DownloadRepositoriesUseCase<'a, R> {
    git: &'a GitScm<R>,
}

impl<'a, R: CommandRunner> DownloadRepositoriesUseCase<'a, R> {
    pub fn new(git: &'a GitScm<R>) -> Self {
        Self { git }
    }

    /// レジストリの順にリポジトリを処理する
    ///
    /// 1. 作業ディレクトリが無ければ（ブランチ指定付きで）クローン
    /// 2. ブランチ未指定のリポジトリは現在のブランチを問い合わせてレコードに保存
    ///
    /// 設定済みのブランチは上書きしない。
    pub fn execute(&self, registry: &mut Registry) -> MassGitResult<DownloadResult> {
        let mut result = DownloadResult::default();

        for record in registry.iter_mut() {
            let repo_path = self.git.repo_path(record);

            if repo_path.is_dir() {
                debug!(directory = %record.directory, "Working copy already present");
                result.existing.push(record.directory.clone());
            } else {
                info!(url = %record.url, directory = %record.directory, "Cloning repository");
                self.git.clone_repository(
                    &record.url,
                    &record.directory,
                    record.branch.as_deref(),
                )?;

                if !repo_path.is_dir() {
                    warn!(
                        directory = %record.directory,
                        "Clone did not produce a working copy"
                    );
                    result.missing.push(record.directory.clone());
                    continue;
                }
                result.cloned.push(record.directory.clone());
            }

            if !record.has_branch() {
                let current = self.git.current_branch(&repo_path)?;
                if current.is_empty() {
                    warn!(directory = %record.directory, "Could not determine current branch");
                } else {
                    debug!(directory = %record.directory, branch = %current, "Detected branch");
                    record.branch = Some(current);
                    result.branches_detected.push(record.directory.clone());
                }
            }
        }

        Ok(result)
    }
}
