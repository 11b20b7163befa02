//! Process-wide storage of canonical games
//!
//! Every [`CanonicalGame`] is a handle into a single append-only arena. Three concurrent tables
//! sit next to the arena: canonical option sets, number-up-star keys, and results of binary
//! operations. Nothing is ever removed, so a handle stays valid for the rest of the process.

use crate::short::partizan::{
    canonical_game::{CanonicalGame, GameId, nus::Nus},
    thermograph::Thermograph,
};
use append_only_vec::AppendOnlyVec;
use dashmap::DashMap;
use std::{
    fmt::Display,
    sync::{LazyLock, OnceLock, PoisonError, RwLock},
};

/// Stored canonical game
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) left: Box<[CanonicalGame]>,
    pub(crate) right: Box<[CanonicalGame]>,
    pub(crate) nus: Option<Nus>,
    pub(crate) birthday: u32,
    pub(crate) inverse: OnceLock<CanonicalGame>,
    pub(crate) thermograph: OnceLock<Thermograph>,
}

/// Sorted, canonical options of a game
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct OptionsKey {
    left: Box<[CanonicalGame]>,
    right: Box<[CanonicalGame]>,
}

/// Operations with memoized results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Operation {
    Sum,
    NortonProduct,
    ConwayProduct,
    OrdinalSum,
    AtomicWeight,
}

/// Operation applied to operands identified by their handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct OperationKey {
    operation: Operation,
    lhs: CanonicalGame,
    rhs: Option<CanonicalGame>,
}

impl OperationKey {
    pub(crate) fn binary(operation: Operation, lhs: CanonicalGame, rhs: CanonicalGame) -> Self {
        let (lhs, rhs) = match operation {
            // Sum commutes, so both operand orders share one entry
            Operation::Sum if rhs.id() < lhs.id() => (rhs, lhs),
            _ => (lhs, rhs),
        };
        Self {
            operation,
            lhs,
            rhs: Some(rhs),
        }
    }

    pub(crate) const fn unary(operation: Operation, operand: CanonicalGame) -> Self {
        Self {
            operation,
            lhs: operand,
            rhs: None,
        }
    }
}

/// Storage of all canonical games constructed so far
pub(crate) struct Universe {
    nodes: AppendOnlyVec<Node>,
    by_options: DashMap<OptionsKey, CanonicalGame, ahash::RandomState>,
    by_nus: DashMap<Nus, CanonicalGame, ahash::RandomState>,
    operations: DashMap<OperationKey, CanonicalGame, ahash::RandomState>,
}

static UNIVERSE: LazyLock<Universe> = LazyLock::new(Universe::new);

/// The process-wide universe
#[inline]
pub(crate) fn global() -> &'static Universe {
    &UNIVERSE
}

impl Universe {
    fn new() -> Self {
        let universe = Self {
            nodes: AppendOnlyVec::new(),
            by_options: DashMap::default(),
            by_nus: DashMap::default(),
            operations: DashMap::default(),
        };

        // Zero is the only game without options and every other game is built on top of it
        let zero = CanonicalGame::from_id_unchecked(GameId(universe.nodes.push(Node {
            left: Box::new([]),
            right: Box::new([]),
            nus: Some(Nus::new_integer(0)),
            birthday: 0,
            inverse: OnceLock::new(),
            thermograph: OnceLock::new(),
        })));
        debug_assert_eq!(zero.id(), GameId(0));
        universe.by_options.insert(
            OptionsKey {
                left: Box::new([]),
                right: Box::new([]),
            },
            zero,
        );
        universe.by_nus.insert(Nus::new_integer(0), zero);

        universe
    }

    #[inline]
    pub(crate) fn node(&'static self, id: GameId) -> &'static Node {
        &self.nodes[id.0]
    }

    /// Number of games in the arena
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn lookup_nus(&self, nus: &Nus) -> Option<CanonicalGame> {
        self.by_nus.get(nus).map(|game| *game)
    }

    /// Find or create the game with given canonical options. Options must be sorted with
    /// [`CanonicalGame::compare_and_order`] and free of dominated and reversible options.
    pub(crate) fn intern(&self, left: Vec<CanonicalGame>, right: Vec<CanonicalGame>) -> CanonicalGame {
        let key = OptionsKey {
            left: left.into_boxed_slice(),
            right: right.into_boxed_slice(),
        };
        if let Some(game) = self.by_options.get(&key) {
            return *game;
        }

        // Built outside of the table lock, it may read other nodes
        let nus = Nus::detect(&key.left, &key.right);
        let birthday = key
            .left
            .iter()
            .chain(key.right.iter())
            .map(|option| option.birthday() + 1)
            .max()
            .unwrap_or(0);
        let node = Node {
            left: key.left.clone(),
            right: key.right.clone(),
            nus,
            birthday,
            inverse: OnceLock::new(),
            thermograph: OnceLock::new(),
        };

        let mut created = false;
        let game = *self.by_options.entry(key).or_insert_with(|| {
            created = true;
            CanonicalGame::from_id_unchecked(GameId(self.nodes.push(node)))
        });

        if created {
            if let Some(nus) = nus {
                self.by_nus.entry(nus).or_insert(game);
            }
            tracing::trace!(id = game.id().0, birthday, nus = ?nus, "New canonical game");
        }

        game
    }

    pub(crate) fn operation(&self, key: &OperationKey) -> Option<CanonicalGame> {
        self.operations.get(key).map(|game| *game)
    }

    /// Remember the result of an operation. If another thread got there first its result is
    /// kept and returned.
    pub(crate) fn insert_operation(&self, key: OperationKey, result: CanonicalGame) -> CanonicalGame {
        *self.operations.entry(key).or_insert(result)
    }
}

/// Sizes of the process-wide tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    /// Number of distinct canonical games constructed so far
    pub canonical_games: usize,

    /// Number of those games that are of the form number + up multiple + nimber
    pub number_up_stars: usize,

    /// Number of memoized operation results
    pub operations: usize,
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Number of Distinct Canonical Games: {}", self.canonical_games)?;
        writeln!(f, "Number of Games of Form m^n*k: {}", self.number_up_stars)
    }
}

/// Take a snapshot of the table sizes
pub fn report() -> Report {
    let universe = global();
    // Number-up-stars are registered after their nodes, so count them first
    let report = Report {
        number_up_stars: universe.by_nus.len(),
        canonical_games: universe.len(),
        operations: universe.operations.len(),
    };
    tracing::debug!(?report, "Universe report");
    report
}

/// Receiver of non-fatal warnings, e.g. a failed atomic weight sanity check
pub type WarningSink = Box<dyn Fn(&str) + Send + Sync>;

static WARNING_SINK: RwLock<Option<WarningSink>> = RwLock::new(None);

/// Replace the receiver of non-fatal warnings. By default warnings go to [`tracing::warn!`].
pub fn set_warning_sink(sink: WarningSink) {
    tracing::debug!("Installing custom warning sink");
    *WARNING_SINK.write().unwrap_or_else(PoisonError::into_inner) = Some(sink);
}

/// Send warnings back to [`tracing::warn!`]
pub fn reset_warning_sink() {
    *WARNING_SINK.write().unwrap_or_else(PoisonError::into_inner) = None;
}

pub(crate) fn warn(message: &str) {
    match WARNING_SINK
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        Some(sink) => sink(message),
        None => tracing::warn!("{message}"),
    }
}
