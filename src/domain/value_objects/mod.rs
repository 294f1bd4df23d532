pub mod git_url;
