use std::collections::VecDeque;
use std::io::BufRead;

/// The output capability the interpreter writes through.
///
/// `ΓΡΑΨΕ` formats its arguments into a single line and hands it to the
/// sink; the interpreter never buffers output of its own.
pub trait OutputSink {
    /// Appends one line of text to the user-visible output.
    fn write_line(&mut self, text: &str);
}

/// The input capability the interpreter reads through.
///
/// Each `ΔΙΑΒΑΣΕ` target consumes exactly one line. The host may block
/// (prompting a user, waiting on a pipe) for as long as it likes; the
/// interpreter simply waits.
pub trait InputSource {
    /// Returns the next input line, or `None` when the source is
    /// exhausted.
    fn read_line(&mut self) -> Option<String>;
}

/// Output sink that prints to the process stdout.
#[derive(Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Input source that reads lines from the process stdin.
#[derive(Default)]
pub struct StdinSource;

impl InputSource for StdinSource {
    fn read_line(&mut self) -> Option<String> {
        let mut buffer = String::new();
        match std::io::stdin().lock().read_line(&mut buffer) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                if buffer.ends_with('\n') {
                    buffer.pop();
                    if buffer.ends_with('\r') {
                        buffer.pop();
                    }
                }
                Some(buffer)
            },
        }
    }
}

/// Scripted input for tests and embedding: a queue of lines handed out in
/// order, then exhaustion.
#[derive(Default)]
pub struct QueuedInput {
    lines: VecDeque<String>,
}

impl QueuedInput {
    /// Creates a queue from anything yielding line-like strings.
    pub fn new<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { lines: lines.into_iter().map(Into::into).collect() }
    }
}

impl InputSource for QueuedInput {
    fn read_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}

/// Recording output for tests and embedding: every written line is kept in
/// order.
#[derive(Default)]
pub struct CapturedOutput {
    /// The lines written so far, oldest first.
    pub lines: Vec<String>,
}

impl OutputSink for CapturedOutput {
    fn write_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}
