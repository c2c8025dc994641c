//! Alternate spellings of product identifiers.
//!
//! Retailers write the same model as "DSC-W310", "DSC W310" or "DSCW310", so
//! every identifier is expanded into the spellings reachable by swapping or
//! dropping spaces and dashes.

/// Space/dash variants of `identifier`, without duplicates.
///
/// An absent identifier yields a single empty string. Matching treats the
/// empty variant as "no constraint on this dimension".
pub fn variants(identifier: Option<&str>) -> Vec<String> {
    let Some(identifier) = identifier else {
        return vec![String::new()];
    };

    let candidates = [
        identifier.to_string(),
        identifier.replace('-', " "),
        identifier.replace(' ', "-"),
        identifier.replace('-', ""),
        identifier.replace(' ', ""),
    ];

    let mut unique: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}
