use std::io::{self, IsTerminal, Read};

/// Collect node text from positional words, or from stdin when there are
/// none or the only word is `-`.
pub fn read_node_text(words: &[String]) -> io::Result<String> {
    match words {
        [] => read_stdin(),
        [only] if only == "-" => read_stdin(),
        _ => Ok(words.join(" ")),
    }
}

fn read_stdin() -> io::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter node text, then press Ctrl-D:");
    }
    let mut text = String::new();
    stdin.lock().read_to_string(&mut text)?;
    Ok(text)
}
