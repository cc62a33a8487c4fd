//! Reference schema and fixture data shared by the integration tests.

use snomed_finder::{ConceptFinder, SqliteSource};

pub const FIFTH_METATARSAL: u64 = 301000;
pub const FOURTH_METATARSAL: u64 = 302000;
pub const INACTIVE_MEMBERSHIP_CONCEPT: u64 = 303000;
pub const ACCESS_INSTRUMENT_INACTIVE: u64 = 370127007;
pub const PUNCH_DRUNK_ACTIVE: u64 = 230283005;
pub const PUNCH_DRUNK_INACTIVE: u64 = 51996004;
pub const RETIRED_DRUNK_TERM: u64 = 111000;
pub const HEART_STRUCTURE: u64 = 400000;
pub const NO_PREFERRED_TERM: u64 = 500000;
pub const DANGLING_MEMBER: u64 = 600000;
pub const CYCLE_A: u64 = 700001;
pub const CYCLE_B: u64 = 700002;

pub const BODY_STRUCTURE_REFSET: u64 = 32570331000036102;
pub const EMPTY_REFSET: u64 = 32570031000036104;
pub const MISSING_REFSET: u64 = 999999999;
pub const CYCLE_REFSET_A: u64 = CYCLE_A;

/// Number of `Heart thing` concepts.
pub const HEART_THINGS: u64 = 12;

const SCHEMA: &str = "
CREATE TABLE concepts (
    id INTEGER NOT NULL,
    effectivetime TEXT NOT NULL,
    active INTEGER NOT NULL
);
CREATE TABLE descriptions (
    id INTEGER NOT NULL,
    effectivetime TEXT NOT NULL,
    active INTEGER NOT NULL,
    conceptid INTEGER NOT NULL,
    term TEXT NOT NULL
);
CREATE TABLE description_refset (
    id TEXT NOT NULL,
    effectivetime TEXT NOT NULL,
    active INTEGER NOT NULL,
    refsetid INTEGER NOT NULL,
    referenceddescriptionid INTEGER NOT NULL,
    valueid INTEGER
);
CREATE TABLE concept_refset (
    id TEXT NOT NULL,
    effectivetime TEXT NOT NULL,
    active INTEGER NOT NULL,
    refsetid INTEGER NOT NULL,
    referencedconceptid INTEGER NOT NULL
);
";

// 900000000000548007 = preferred, 900000000000549004 = acceptable,
// 32570271000036106 = Australian dialect reference set,
// 900000000000509007 = US English language reference set.
const DATA: &str = "
INSERT INTO concepts VALUES
    (301000, '20020131', 1),
    (302000, '20020131', 1),
    (303000, '20020131', 1),
    (370127007, '20020131', 0),
    (230283005, '20020131', 1),
    (51996004, '20020131', 0),
    (111000, '20020131', 1),
    (400000, '20020131', 1),
    (500000, '20020131', 1),
    (600000, '20020131', 1),
    (700001, '20020131', 1),
    (700002, '20020131', 1),
    (32570331000036102, '20100531', 1);

INSERT INTO descriptions VALUES
    (1001, '20020131', 1, 301000, 'Fifth metatarsal structure'),
    (1002, '20020131', 1, 301000, 'Fifth metatarsal bone'),
    (1003, '20020131', 0, 301000, 'Obsolete fifth metatarsal'),
    (1011, '20020131', 1, 302000, 'Fourth metatarsal structure'),
    (1021, '20020131', 1, 303000, 'Third metatarsal structure'),
    (1031, '20020131', 1, 370127007, 'Access instrument'),
    (1041, '20020131', 1, 230283005, 'Punch drunk'),
    (1051, '20020131', 1, 51996004, 'Punch drunk'),
    (1061, '20020131', 0, 111000, 'Drunken gait'),
    (1062, '20020131', 1, 111000, 'Staggering gait'),
    (1071, '20020131', 1, 400000, 'Heart structure'),
    (1072, '20180531', 1, 400000, 'Heart structure'),
    (1081, '20020131', 1, 500000, 'Zeta term'),
    (1082, '20020131', 1, 500000, 'Alpha term'),
    (1091, '20020131', 1, 600000, 'Dangling member'),
    (1101, '20020131', 1, 700001, 'Cycle refset A'),
    (1111, '20020131', 1, 700002, 'Cycle refset B'),
    (1201, '20100531', 1, 32570331000036102, 'Body structure reference set');

INSERT INTO description_refset VALUES
    ('a1', '20020131', 1, 32570271000036106, 1001, 900000000000548007),
    ('a2', '20020131', 1, 32570271000036106, 1002, 900000000000549004),
    ('a3', '20020131', 1, 32570271000036106, 1011, 900000000000548007),
    ('a4', '20020131', 1, 32570271000036106, 1041, 900000000000548007),
    ('a5', '20020131', 1, 32570271000036106, 1062, 900000000000548007),
    ('a6', '20020131', 1, 32570271000036106, 1071, 900000000000549004),
    ('a7', '20180531', 1, 32570271000036106, 1072, 900000000000548007),
    ('a8', '20020131', 1, 32570271000036106, 1081, 900000000000549004),
    ('a9', '20100531', 1, 32570271000036106, 1201, 900000000000548007),
    ('u1', '20200531', 1, 900000000000509007, 1002, 900000000000548007);

INSERT INTO concept_refset VALUES
    ('m1', '20100531', 1, 32570331000036102, 301000),
    ('m2', '20100531', 1, 32570331000036102, 302000),
    ('m3', '20100531', 0, 32570331000036102, 303000),
    ('m4', '20100531', 1, 32570331000036102, 370127007),
    ('m5', '20100531', 1, 32570031000036104, 370127007),
    ('m6', '20100531', 1, 999999999, 600000),
    ('m7', '20100531', 1, 700002, 700001),
    ('m8', '20100531', 1, 700001, 700002),
    ('m9', '20200531', 0, 32570331000036102, 301000);
";

/// Opens an in-memory reference database with the fixture loaded.
pub fn fixture_source(max_rows: i64) -> SqliteSource {
    let source = SqliteSource::open_in_memory()
        .expect("in-memory database")
        .with_max_rows(max_rows);
    source.execute_batch(SCHEMA).expect("schema");
    source.execute_batch(DATA).expect("fixture data");
    source.execute_batch(&heart_things()).expect("heart fixture");
    source
}

/// A finder over the fixture database with no row cap.
pub fn fixture_finder() -> ConceptFinder<SqliteSource> {
    ConceptFinder::new(fixture_source(0))
}

/// Concepts 800001.. each with one active `Heart thing N` description.
fn heart_things() -> String {
    let mut sql = String::new();
    for n in 1..=HEART_THINGS {
        let id = 800000 + n;
        sql.push_str(&format!(
            "INSERT INTO concepts VALUES ({id}, '20020131', 1);
             INSERT INTO descriptions VALUES ({desc}, '20020131', 1, {id}, 'Heart thing {n}');",
            id = id,
            desc = 9000 + n,
            n = n,
        ));
    }
    sql
}
