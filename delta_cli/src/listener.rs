//! Operator commands typed on stdin while tracking.

use std::io::BufRead;

use delta_core::{SessionCommand, SessionHandle};

/// Map one input line to a session command. Blank or unknown lines map to nothing.
pub fn parse_command(line: &str) -> Option<SessionCommand> {
    match line.trim() {
        "q" | "quit" | "stop" => Some(SessionCommand::Stop),
        "r" | "record" => Some(SessionCommand::ToggleRecord),
        "p" | "replay" => Some(SessionCommand::Replay),
        _ => None,
    }
}

/// Forward commands from `input` to the session until the session stops.
///
/// End of input does not stop tracking; a detached or piped stdin leaves
/// the loop running until Ctrl-C or `--max-cycles`.
pub fn listen<R: BufRead>(input: R, handle: &SessionHandle) {
    for line in input.lines() {
        let Ok(line) = line else {
            break;
        };
        match parse_command(&line) {
            Some(cmd) => {
                tracing::debug!(?cmd, "operator command");
                if !handle.send(cmd) || handle.is_stopped() {
                    break;
                }
            }
            None if line.trim().is_empty() => {}
            None => eprintln!("unknown command {:?} (q = stop, r = record, p = replay)", line.trim()),
        }
    }
    tracing::trace!("command listener exiting");
}

/// Spawn the stdin listener. The thread is detached: a blocking read on
/// stdin cannot be interrupted, and process exit reclaims it.
pub fn spawn_stdin(handle: SessionHandle) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("delta-stdin".into())
        .spawn(move || listen(std::io::stdin().lock(), &handle))
        .map(drop)
}
