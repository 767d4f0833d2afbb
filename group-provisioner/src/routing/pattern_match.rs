//! Topic pattern matching: derives the most specific filter two patterns agree on.

use crate::routing::topic_pattern::{
    InvalidPatternError, TopicPattern, MULTI_LEVEL_WILDCARD, SINGLE_LEVEL_WILDCARD,
};

/// Matches two already-validated topic patterns.
///
/// Returns the most specific topic filter both a publisher pattern and a
/// subscriber pattern can agree on, or `None` when the patterns cannot be
/// connected. Pure function; honors MQTT wildcard semantics (`+` one level,
/// `#` all remaining levels).
pub fn match_patterns(a: &TopicPattern, b: &TopicPattern) -> Option<TopicPattern> {
    let a_levels = a.levels();
    let b_levels = b.levels();

    let shared_len = a_levels.len().min(b_levels.len());
    let mut output: Vec<String> = Vec::with_capacity(shared_len);

    // Shared prefix, excluding the final level of the shorter pattern.
    // Validated patterns cannot carry `#` here.
    for index in 0..shared_len - 1 {
        let a_level = a_levels[index].as_str();
        let b_level = b_levels[index].as_str();

        if a_level == b_level {
            output.push(a_level.to_string());
        } else if a_level == SINGLE_LEVEL_WILDCARD {
            output.push(b_level.to_string());
        } else if b_level == SINGLE_LEVEL_WILDCARD {
            output.push(a_level.to_string());
        } else {
            return None;
        }
    }

    let a_last = a_levels[shared_len - 1].as_str();
    let b_last = b_levels[shared_len - 1].as_str();
    let a_ends = a_levels.len() == shared_len;
    let b_ends = b_levels.len() == shared_len;

    // A multi-level wildcard at the shared final index absorbs everything the
    // other side still has, so the joined filter keeps the wildcard.
    if a_last == MULTI_LEVEL_WILDCARD || b_last == MULTI_LEVEL_WILDCARD {
        output.push(MULTI_LEVEL_WILDCARD.to_string());
        return Some(TopicPattern::from_levels(output));
    }

    // Without a trailing `#`, patterns of different depth cannot agree on a
    // single filter.
    if !a_ends || !b_ends {
        return None;
    }

    if a_last == b_last {
        output.push(a_last.to_string());
    } else if a_last == SINGLE_LEVEL_WILDCARD {
        output.push(b_last.to_string());
    } else if b_last == SINGLE_LEVEL_WILDCARD {
        output.push(a_last.to_string());
    } else {
        return None;
    }

    Some(TopicPattern::from_levels(output))
}

/// Parses and matches two topic strings in one step.
///
/// Either input using `#` outside the final level (or containing an empty
/// level) fails with [`InvalidPatternError`]; a valid pair that cannot be
/// connected yields `Ok(None)`.
pub fn match_topic_strings(
    a: &str,
    b: &str,
) -> Result<Option<TopicPattern>, InvalidPatternError> {
    let a = TopicPattern::parse(a)?;
    let b = TopicPattern::parse(b)?;
    Ok(match_patterns(&a, &b))
}
