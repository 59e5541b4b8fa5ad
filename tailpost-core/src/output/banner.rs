use std::path::Path;

/// Header naming the source file of the block that follows.
///
/// The first banner of a run has no leading blank line.
pub fn banner(path: &Path, first: bool) -> String {
    let sep = if first { "" } else { "\n" };
    format!("{sep}==> {} <==\n", path.display())
}

/// Decides when a banner precedes a block of output.
#[derive(Debug, Default)]
pub struct Banners {
    enabled: bool,
    written_any: bool,
    last_source: Option<usize>,
}

impl Banners {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Banner for the start of a file's initial window, written even if the
    /// previous block came from the same file.
    pub fn force(&mut self, index: usize, path: &Path) -> Option<String> {
        self.last_source = Some(index);
        if !self.enabled {
            return None;
        }
        let first = !self.written_any;
        self.written_any = true;
        Some(banner(path, first))
    }

    /// Banner for a block from `index`, only when the source changed.
    pub fn before_block(&mut self, index: usize, path: &Path) -> Option<String> {
        if self.last_source == Some(index) {
            return None;
        }
        self.force(index, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_banner_has_no_leading_newline() {
        let mut banners = Banners::new(true);
        assert_eq!(
            banners.force(0, Path::new("a.log")).as_deref(),
            Some("==> a.log <==\n")
        );
        assert_eq!(
            banners.force(1, Path::new("b.log")).as_deref(),
            Some("\n==> b.log <==\n")
        );
    }

    #[test]
    fn same_source_gets_no_repeat_banner() {
        let mut banners = Banners::new(true);
        assert!(banners.before_block(0, Path::new("a.log")).is_some());
        assert!(banners.before_block(0, Path::new("a.log")).is_none());
        assert_eq!(
            banners.before_block(1, Path::new("b.log")).as_deref(),
            Some("\n==> b.log <==\n")
        );
        assert_eq!(
            banners.before_block(0, Path::new("a.log")).as_deref(),
            Some("\n==> a.log <==\n")
        );
    }

    #[test]
    fn disabled_banners_are_never_written() {
        let mut banners = Banners::new(false);
        assert!(banners.force(0, Path::new("a.log")).is_none());
        assert!(banners.before_block(1, Path::new("b.log")).is_none());
    }
}
