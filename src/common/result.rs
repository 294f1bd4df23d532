use crate::common::error::MassGitError;

/// massgit全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use massgit::common::result::MassGitResult;
/// use massgit::common::error::MassGitError;
///
/// fn example_function() -> MassGitResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> MassGitResult<()> {
///     Err(MassGitError::missing_url_field(0))
/// }
/// ```
pub type MassGitResult<T> = Result<T, MassGitError>;

/// Resultのエラー変換ヘルパー
pub trait ResultExt<T, E> {
    /// ファイルシステムエラーとしてMassGitResultに変換
    ///
    /// # Examples
    ///
    /// ```
    /// use massgit::common::result::{MassGitResult, ResultExt};
    /// use std::path::PathBuf;
    ///
    /// let result: Result<String, std::io::Error> = Err(std::io::Error::new(
    ///     std::io::ErrorKind::NotFound, "file not found"
    /// ));
    /// let converted: MassGitResult<String> =
    ///     result.with_filesystem_error("Failed to read", Some(PathBuf::from(".memory")));
    /// assert!(converted.is_err());
    /// ```
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> MassGitResult<T>
    where
        E: Into<std::io::Error>;

    /// 設定ファイルの解析エラーとしてMassGitResultに変換
    fn with_malformed_config(
        self,
        message: impl Into<String>,
        path: &std::path::Path,
    ) -> MassGitResult<T>
    where
        E: std::error::Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> MassGitResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| {
            let io_error = e.into();
            MassGitError::filesystem_error_with_source(message, path, io_error)
        })
    }

    fn with_malformed_config(
        self,
        message: impl Into<String>,
        path: &std::path::Path,
    ) -> MassGitResult<T>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.map_err(|e| MassGitError::malformed_config_with_source(message, path, e))
    }
}

/// ログ出力付きでエラーを握りつぶすためのヘルパー
pub trait MassGitResultExt<T> {
    /// Optionに変換（エラーをwarnログに出力）
    fn to_option_logged(self) -> Option<T>;
}

impl<T> MassGitResultExt<T> for MassGitResult<T> {
    fn to_option_logged(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }
}
