use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::args::LoadArgs;
use crate::error::{AppError, AppResult, HttpError};

/// Reads a newline-delimited dictionary for `$RDICT`.
///
/// Lines are kept verbatim apart from the line terminator (`\n` or `\r\n`).
/// An empty file yields an empty dictionary.
///
/// # Errors
///
/// Returns an error when the file cannot be read.
pub fn load_dictionary(path: &Path) -> AppResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::http(HttpError::ReadDictionary {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    Ok(content.lines().map(str::to_owned).collect())
}

/// Resolves the request body template.
///
/// `--data` wins, then `--data-file`, then whatever is waiting on stdin when
/// stdin is not a terminal. An empty body counts as no body.
///
/// # Errors
///
/// Returns an error when the body file or stdin cannot be read.
pub fn read_request_body(args: &LoadArgs) -> AppResult<Option<String>> {
    if let Some(data) = args.data.as_ref() {
        return Ok(non_empty(data.clone()));
    }

    if let Some(path) = args.data_file.as_ref() {
        let content = std::fs::read_to_string(path).map_err(|err| {
            AppError::http(HttpError::ReadBodyFile {
                path: PathBuf::from(path),
                source: err,
            })
        })?;
        return Ok(non_empty(content));
    }

    if !stdin_has_data() {
        return Ok(None);
    }
    let mut content = String::new();
    std::io::stdin()
        .lock()
        .read_to_string(&mut content)
        .map_err(|err| AppError::http(HttpError::ReadStdin { source: err }))?;
    Ok(non_empty(content))
}

fn non_empty(body: String) -> Option<String> {
    if body.is_empty() { None } else { Some(body) }
}

#[cfg(unix)]
fn stdin_has_data() -> bool {
    if std::io::stdin().is_terminal() {
        return false;
    }
    let mut poll_fd = libc::pollfd {
        fd: libc::STDIN_FILENO,
        events: libc::POLLIN,
        revents: 0,
    };
    // Safety: `poll_fd` is a valid, exclusively borrowed pollfd and the count is 1.
    let ready = unsafe { libc::poll(&raw mut poll_fd, 1, 0) };
    ready > 0 && (poll_fd.revents & libc::POLLIN) != 0
}

#[cfg(not(unix))]
fn stdin_has_data() -> bool {
    !std::io::stdin().is_terminal()
}
