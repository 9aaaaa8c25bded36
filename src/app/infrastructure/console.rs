use std::cell::RefCell;
use std::rc::Rc;

/// Operator-facing console for launch diagnostics (usage text, missing
/// files). Separate from the `log` records, which are for developers.
pub trait Console {
    fn print_line(&mut self, line: &str);
}

/// Writes diagnostics to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn print_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Keeps diagnostics in memory. Clones share the same buffer, so a host
/// can hand one clone to the controller and read the lines back from another.
#[derive(Debug, Default, Clone)]
pub struct MemoryConsole {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl Console for MemoryConsole {
    fn print_line(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_console_shares_buffer() {
        let console = MemoryConsole::new();
        let mut writer: Box<dyn Console> = Box::new(console.clone());
        writer.print_line("!! Missing file y.ctb");
        assert_eq!(console.lines(), vec!["!! Missing file y.ctb".to_string()]);

        console.clear();
        assert!(console.lines().is_empty());
    }
}
