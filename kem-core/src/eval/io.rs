use std::{
    collections::VecDeque,
    io::{BufRead, Write}
};

/// Where `bapu tame bolo` reads from and `bhai bol` writes to.
pub trait InterpreterIO {
    /// One line of input, or `None` once input is exhausted.
    fn read_line(&mut self) -> Option<String>;

    fn write_line(&mut self, line: &str) -> std::io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdIO;

impl InterpreterIO for StdIO {
    fn read_line(&mut self) -> Option<String> {
        let mut buf = String::new();

        match std::io::stdin().lock().read_line(&mut buf) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(buf.trim_end_matches(&['\n', '\r'][..]).to_string()),
        }
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();

        writeln!(stdout, "{line}")?;
        stdout.flush()
    }
}

/// Scripted input, captured output.
#[derive(Debug, Default, Clone)]
pub struct VectorIO {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl VectorIO {
    pub fn new<S: Into<String>>(input: impl IntoIterator<Item = S>) -> Self {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            output: vec![],
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

impl InterpreterIO for VectorIO {
    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.output.push(line.to_string());

        Ok(())
    }
}

/// Adapts a pair of closures.
pub struct FnIO<R, W>
where
    R: FnMut() -> Option<String>,
    W: FnMut(&str),
{
    read: R,
    write: W,
}

impl<R, W> FnIO<R, W>
where
    R: FnMut() -> Option<String>,
    W: FnMut(&str),
{
    pub fn new(read: R, write: W) -> Self {
        Self { read, write }
    }
}

impl<R, W> InterpreterIO for FnIO<R, W>
where
    R: FnMut() -> Option<String>,
    W: FnMut(&str),
{
    fn read_line(&mut self) -> Option<String> {
        (self.read)()
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        (self.write)(line);

        Ok(())
    }
}
