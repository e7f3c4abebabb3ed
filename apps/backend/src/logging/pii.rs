use std::fmt;

/// Display wrapper that masks an email address in log output: keeps the first
/// character of the local part and the full domain, replaces the rest with ***.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.find('@') {
            Some(at_pos) if at_pos > 0 => {
                let local = &self.0[..at_pos];
                let domain = &self.0[at_pos..];
                write!(f, "{}***{domain}", &local[..1])
            }
            _ => write!(f, "***"),
        }
    }
}
