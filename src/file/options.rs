use std::fs::OpenOptions;

/// Platform write flags for `write_file`
///
/// Default behaviour creates the file if needed and truncates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Append to existing content instead of truncating
    pub append: bool,
    /// Fail if the file already exists
    pub create_new: bool,
    /// Permission bits for newly created files (Unix only, ignored elsewhere)
    pub mode: Option<u32>,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn create_new(mut self, create_new: bool) -> Self {
        self.create_new = create_new;
        self
    }

    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub(crate) fn to_std(&self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        opts.write(true);

        if self.create_new {
            opts.create_new(true);
        } else {
            opts.create(true);
        }

        if self.append {
            opts.append(true);
        } else if !self.create_new {
            opts.truncate(true);
        }

        #[cfg(unix)]
        if let Some(mode) = self.mode {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(mode);
        }

        opts
    }

    pub(crate) fn to_tokio(&self) -> tokio::fs::OpenOptions {
        tokio::fs::OpenOptions::from(self.to_std())
    }
}
