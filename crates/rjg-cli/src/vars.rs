use crate::CliError;

/// Split `--var` arguments into `(name, raw value)` pairs.
///
/// Each argument may hold several comma-separated `NAME=VALUE` pairs. A
/// segment that does not start with `NAME=` continues the previous value,
/// so `list=[1,2,3]` stays a single pair. Later pairs replace earlier ones
/// with the same name.
pub fn parse_var_args(args: &[String]) -> Result<Vec<(String, String)>, CliError> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for arg in args {
        let mut current: Option<(String, String)> = None;
        for segment in arg.split(',') {
            match split_pair(segment) {
                Some((name, value)) => {
                    if let Some(pair) = current.take() {
                        push_pair(&mut pairs, pair);
                    }
                    current = Some((name.to_string(), value.to_string()));
                }
                None => match current.as_mut() {
                    Some((_, value)) => {
                        value.push(',');
                        value.push_str(segment);
                    }
                    None => {
                        return Err(CliError::InvalidVariable(format!(
                            "{arg:?} must be formatted as NAME=VALUE"
                        )));
                    }
                },
            }
        }
        if let Some(pair) = current {
            push_pair(&mut pairs, pair);
        }
    }
    Ok(pairs)
}

fn split_pair(segment: &str) -> Option<(&str, &str)> {
    let (name, value) = segment.split_once('=')?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.'));
    valid.then_some((name, value))
}

fn push_pair(pairs: &mut Vec<(String, String)>, pair: (String, String)) {
    pairs.retain(|(name, _)| *name != pair.0);
    pairs.push(pair);
}
