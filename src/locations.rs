//! District table for the search endpoint.

/// ITJobs district ids, keyed by the lowercase name operators type in.
pub const DISTRICTS: &[(&str, u32)] = &[
    ("aveiro", 1),
    ("açores", 2),
    ("beja", 3),
    ("braga", 4),
    ("bragança", 5),
    ("castelo branco", 6),
    ("coimbra", 8),
    ("faro", 9),
    ("évora", 10),
    ("guarda", 11),
    ("portalegre", 12),
    ("leiria", 13),
    ("lisboa", 14),
    ("madeira", 15),
    ("viseu", 16),
    ("setúbal", 17),
    ("porto", 18),
    ("santarém", 20),
    ("vila real", 21),
    ("viana do castelo", 22),
    ("internacional", 29),
];

/// Look up a district id by name, case-insensitively.
pub fn district_id(name: &str) -> Option<u32> {
    let needle = name.trim().to_lowercase();
    DISTRICTS
        .iter()
        .find(|(known, _)| *known == needle)
        .map(|(_, id)| *id)
}
