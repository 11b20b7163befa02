//! Simplification of arbitrary options to canonical form

use crate::short::partizan::{Player, canonical_game::CanonicalGame};

/// Left and Right moves from a given position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Moves {
    /// Left player's moves
    pub(crate) left: Vec<CanonicalGame>,

    /// Right player's moves
    pub(crate) right: Vec<CanonicalGame>,
}

impl Moves {
    /// Sort options and drop repeated ones
    #[inline]
    pub(crate) fn eliminate_duplicates_in(options: &mut Vec<CanonicalGame>) {
        options.sort_by(CanonicalGame::compare_and_order);
        options.dedup();
    }

    #[inline]
    fn eliminate_duplicates(&mut self) {
        Self::eliminate_duplicates_in(&mut self.left);
        Self::eliminate_duplicates_in(&mut self.right);
    }

    /// Return false if `H <= GL` for some left option `GL` of `G` or `HR <= G` for some right
    /// option `HR` of `H`. Otherwise return true.
    ///
    /// Here `G` is `game` and `H` is the game with options `left` and `right`.
    fn leq_arrays(game: CanonicalGame, left: &[CanonicalGame], right: &[CanonicalGame]) -> bool {
        if right.iter().any(|r_opt| r_opt.leq(game)) {
            return false;
        }

        !game
            .left_options()
            .iter()
            .any(|l_move| Self::geq_arrays(*l_move, left, right))
    }

    /// Mirror of [`Self::leq_arrays`]
    fn geq_arrays(game: CanonicalGame, left: &[CanonicalGame], right: &[CanonicalGame]) -> bool {
        if left.iter().any(|l_opt| game.leq(*l_opt)) {
            return false;
        }

        !game
            .right_options()
            .iter()
            .any(|r_move| Self::leq_arrays(*r_move, left, right))
    }

    /// Find a reply of the opponent that reverses `option` of `player`
    fn reversing_reply(&self, player: Player, option: CanonicalGame) -> Option<CanonicalGame> {
        let replies = option.options(player.opposite());
        match player {
            Player::Left => replies
                .iter()
                .find(|reply| Self::leq_arrays(**reply, &self.left, &self.right)),
            Player::Right => replies
                .iter()
                .find(|reply| Self::geq_arrays(**reply, &self.left, &self.right)),
        }
        .copied()
    }

    /// Replace every reversible option of `player` by the options of the reversing reply,
    /// until none is left.
    fn bypass_reversible(&mut self, player: Player) {
        let mut i = 0;
        loop {
            let options = match player {
                Player::Left => &self.left,
                Player::Right => &self.right,
            };
            let Some(&option) = options.get(i) else {
                break;
            };

            match self.reversing_reply(player, option) {
                Some(reply) => {
                    let options = match player {
                        Player::Left => &mut self.left,
                        Player::Right => &mut self.right,
                    };
                    options.remove(i);
                    for bypassed in reply.options(player) {
                        if !options.contains(bypassed) {
                            options.push(*bypassed);
                        }
                    }
                    // Next option moved into slot `i`, check it again
                }
                None => i += 1,
            }
        }
    }

    /// Remove options that are no better for `player` than another option
    pub(crate) fn eliminate_dominated(options: &mut Vec<CanonicalGame>, player: Player) {
        let mut kept: Vec<Option<CanonicalGame>> = options.drain(..).map(Some).collect();

        for i in 0..kept.len() {
            let Some(option) = kept[i] else {
                continue;
            };
            let dominated = kept.iter().enumerate().any(|(j, other)| {
                other.is_some_and(|other| {
                    j != i
                        && match player {
                            Player::Left => option.leq(other),
                            Player::Right => other.leq(option),
                        }
                })
            });
            if dominated {
                kept[i] = None;
            }
        }

        options.extend(kept.into_iter().flatten());
    }

    /// Simplify options to canonical form: remove duplicates, bypass reversible options, then
    /// remove dominated options.
    pub(crate) fn canonicalize(mut self) -> Self {
        self.eliminate_duplicates();
        self.bypass_reversible(Player::Left);
        self.bypass_reversible(Player::Right);
        Self::eliminate_dominated(&mut self.left, Player::Left);
        Self::eliminate_dominated(&mut self.right, Player::Right);
        self
    }
}
