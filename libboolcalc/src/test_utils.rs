/// Run each line of the first macro argument through a fresh [`Engine`] and
/// assert the resulting transcript against the inline snapshot.
///
/// The transcript interleaves `>`-prefixed input lines with whatever the
/// engine returned for them: output lines verbatim, errors as `Error: ...`,
/// and nothing for silent lines.
#[macro_export]
macro_rules! assert_session {
    ($input:expr, @$snapshot:literal) => {{
        let mut engine = $crate::Engine::new();
        let mut transcript = String::new();

        for line in $input.lines() {
            transcript.push_str("> ");
            transcript.push_str(line);
            transcript.push('\n');

            match engine.process(line) {
                Ok(output) if output.is_empty() => {}
                Ok(output) => {
                    transcript.push_str(&output);
                    transcript.push('\n');
                }
                Err(err) => {
                    transcript.push_str("Error: ");
                    transcript.push_str(&err.to_string());
                    transcript.push('\n');
                }
            }
        }

        ::insta::assert_snapshot!(transcript, @$snapshot);
    }};
}
