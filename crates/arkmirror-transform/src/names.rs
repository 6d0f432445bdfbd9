//! Temporary binding names

/// Hands out `prefix1`, `prefix2`, ... and never repeats a name.
///
/// One generator lives as long as the compilation unit it names temporaries
/// for; the [`Pipeline`](crate::Pipeline) owns it and lends it to the passes
/// that introduce bindings.
#[derive(Debug, Clone)]
pub struct TempNames {
    prefix: String,
    next: u64,
}

pub const DEFAULT_TEMP_PREFIX: &str = "gensym%%_";

impl TempNames {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of names handed out so far
    pub fn issued(&self) -> u64 {
        self.next - 1
    }

    pub fn fresh(&mut self) -> String {
        let name = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        name
    }
}

impl Default for TempNames {
    fn default() -> Self {
        Self::new(DEFAULT_TEMP_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_monotonic() {
        let mut names = TempNames::default();
        assert_eq!(names.fresh(), "gensym%%_1");
        assert_eq!(names.fresh(), "gensym%%_2");
        assert_eq!(names.fresh(), "gensym%%_3");
        assert_eq!(names.issued(), 3);
    }

    #[test]
    fn test_custom_prefix() {
        let mut names = TempNames::new("tmp");
        assert_eq!(names.prefix(), "tmp");
        assert_eq!(names.fresh(), "tmp1");
    }
}
