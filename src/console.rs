//! Line-oriented stdout sink shared by the reporter, the workers and the
//! final report.
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

pub struct Console {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    #[must_use]
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Writes `text` plus a newline as one uninterrupted unit.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying writer fails.
    pub fn line(&self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()
    }

    /// Like [`Console::line`], but a write failure is only logged.
    pub fn emit(&self, text: &str) {
        if let Err(err) = self.line(text) {
            tracing::warn!("Failed to write output: {}", err);
        }
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex, PoisonError};

    use super::Console;

    /// In-memory writer whose contents stay readable after the console
    /// takes ownership of a clone.
    #[derive(Clone, Default)]
    pub(crate) struct CapturedOutput {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl CapturedOutput {
        pub(crate) fn console(&self) -> Console {
            Console::new(Box::new(self.clone()))
        }

        pub(crate) fn text(&self) -> String {
            let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&buffer).into_owned()
        }

        pub(crate) fn lines(&self) -> Vec<String> {
            self.text().lines().map(str::to_owned).collect()
        }
    }

    impl Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
            buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
