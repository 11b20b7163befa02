//! Short games, i.e. games with finitely many positions and no infinite play

pub mod partizan;
