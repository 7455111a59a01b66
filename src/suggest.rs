/// Ghost-text completion for the terminal input line.
///
/// A single word is matched against the command vocabulary; with more words
/// the last one is completed as a file name and the rest of the line is kept.
/// Matching is a case-insensitive prefix test and the first hit in vocabulary
/// order wins. Returns an empty string when nothing matches.
pub fn suggest<S: AsRef<str>>(input: &str, commands: &[&str], file_names: &[S]) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    let parts: Vec<&str> = input.split(' ').collect();
    let partial = parts[parts.len() - 1].to_lowercase();

    if parts.len() == 1 {
        return commands
            .iter()
            .find(|c| c.to_lowercase().starts_with(&partial))
            .map(|c| c.to_string())
            .unwrap_or_default();
    }

    match file_names.iter().map(AsRef::as_ref).find(|f| f.to_lowercase().starts_with(&partial)) {
        Some(name) => format!("{} {}", parts[..parts.len() - 1].join(" "), name),
        None => String::new(),
    }
}
