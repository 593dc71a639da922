//! String rules: trimming and length bounds

/// Removes leading and trailing whitespace
pub fn trim(value: &str) -> &str {
    value.trim()
}

/// Length in Unicode scalar values
pub fn char_length(value: &str) -> usize {
    value.chars().count()
}

/// Inclusive lower bound on length
pub fn has_min_length(value: &str, min: usize) -> bool {
    char_length(value) >= min
}

/// Inclusive upper bound on length
pub fn has_max_length(value: &str, max: usize) -> bool {
    char_length(value) <= max
}

/// Parses a length parameter such as the `5` in `min_length[5]`
pub fn parse_length(parameter: Option<&str>) -> Option<usize> {
    parameter.and_then(|p| p.trim().parse::<usize>().ok())
}
