//! Configuration access port trait.

pub trait ConfigPort {
    /// Trimmed value; blank values count as absent.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Trimmed value, keeping blanks: `key =` gives `Some("")`.
    fn get_raw(&self, section: &str, key: &str) -> Option<String>;

    /// `Err` carries the raw text when the key exists but is not an integer.
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, String>;
}
