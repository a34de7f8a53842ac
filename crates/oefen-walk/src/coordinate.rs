use std::path::{Component, Path};

use oefen_core::{normalize_domain, Level, PackCoordinate};

const TOPICS_SEGMENT: &str = "topics";

fn group_number(segment: &str) -> Option<u8> {
    segment.strip_prefix("groep-")?.parse().ok()
}

fn is_structural(segment: &str) -> bool {
    segment == TOPICS_SEGMENT || group_number(segment).is_some() || Level::parse(segment).is_some()
}

/// Derives a pack coordinate from its content-root relative path.
///
/// The segment after the locale names the domain; without a locale segment
/// the first segment does, unless it is structural. `groep-N` names the
/// group, a level tag names the level and the segment after `topics` names
/// the topic. Missing segments keep their placeholder.
pub fn parse_coordinate(relative: &Path, locale: &str) -> PackCoordinate {
    let mut segments: Vec<&str> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    segments.pop();

    let mut coordinate = PackCoordinate::unknown();
    let domain = match segments.iter().position(|segment| *segment == locale) {
        Some(pos) => segments.get(pos + 1).copied(),
        None => segments.first().copied().filter(|first| !is_structural(first)),
    };
    if let Some(domain) = domain.filter(|domain| !is_structural(domain)) {
        coordinate.domain = normalize_domain(domain);
    }
    if let Some(group) = segments.iter().find_map(|segment| group_number(segment)) {
        coordinate.group = Some(group);
    }
    if let Some(level) = segments.iter().find_map(|segment| Level::parse(segment)) {
        coordinate.level = level.as_str().to_string();
    }
    if let Some(pos) = segments.iter().position(|segment| *segment == TOPICS_SEGMENT) {
        if let Some(topic) = segments.get(pos + 1) {
            coordinate.topic = (*topic).to_string();
        }
    }
    coordinate
}
