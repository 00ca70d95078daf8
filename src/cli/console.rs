use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Line-oriented prompt/response over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())?;
        self.output.flush()
    }

    /// Prints `message` and reads one trimmed line. `None` means end of input.
    pub async fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line).await? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD and fail validation like any typo.
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
