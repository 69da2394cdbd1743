//! The kind/operation tables of every CIP.
//!
//! Each CIP owns a disjoint block of kinds. The tables are the single source
//! of truth: the process-wide registry is built from them and the ops string
//! a subspace announces is rendered from them.

use subspace_core::Vocabulary;

/// CIP-01: governance.
pub const GOVERNANCE: Vocabulary = Vocabulary {
    name: "governance",
    entries: &[
        (30300, "post"),
        (30301, "propose"),
        (30302, "vote"),
        (30303, "invite"),
        (30304, "mint"),
    ],
};

/// CIP-02: common graph (projects, tasks and a knowledge graph).
pub const COMMON_GRAPH: Vocabulary = Vocabulary {
    name: "common_graph",
    entries: &[
        (30101, "project"),
        (30102, "task"),
        (30103, "entity"),
        (30104, "relation"),
        (30105, "observation"),
    ],
};

/// CIP-03: model graph.
pub const MODEL_GRAPH: Vocabulary = Vocabulary {
    name: "model_graph",
    entries: &[
        (30404, "model"),
        (30405, "dataset"),
        (30406, "compute"),
        (30407, "algo"),
        (30408, "valid"),
        (30409, "finetune"),
        (30410, "conversation"),
        (30411, "session"),
    ],
};

/// CIP-05: open research.
pub const OPEN_RESEARCH: Vocabulary = Vocabulary {
    name: "open_research",
    entries: &[
        (30501, "paper"),
        (30502, "annotation"),
        (30503, "review"),
        (30504, "ai_analysis"),
        (30505, "discussion"),
        (30506, "read_paper"),
        (30507, "co_create_paper"),
        (30508, "search"),
    ],
};

/// CIP-06: social actions.
pub const SOCIAL: Vocabulary = Vocabulary {
    name: "social",
    entries: &[
        (30600, "like"),
        (30601, "collect"),
        (30602, "share"),
        (30603, "comment"),
        (30604, "tag"),
        (30605, "follow"),
        (30606, "unfollow"),
        (30607, "question"),
        (30608, "room"),
        (30609, "message"),
    ],
};

/// CIP-07: community actions.
pub const COMMUNITY: Vocabulary = Vocabulary {
    name: "community",
    entries: &[
        (30700, "community_create"),
        (30701, "community_invite"),
        (30702, "channel_create"),
        (30703, "channel_message"),
    ],
};

/// Every CIP table, in CIP order.
pub const ALL: [Vocabulary; 6] = [
    GOVERNANCE,
    COMMON_GRAPH,
    MODEL_GRAPH,
    OPEN_RESEARCH,
    SOCIAL,
    COMMUNITY,
];
