//! Property tests over random play-outs.

use proptest::prelude::*;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::actions::GameAction;
use crate::domain::catalogue::deck_for_player_count;
use crate::domain::events::GameEvent;
use crate::domain::legal::legal_actions;
use crate::domain::player_view::{project, CardView};
use crate::domain::resolution::{frame_verdict, resolve_pause};
use crate::domain::rules::PREPARATION_TOKENS;
use crate::domain::state::{Game, Substate};
use crate::domain::test_state_helpers::{seeded_game, started, T0};
use crate::domain::turn::{apply_action_at, ActionOutcome};
use crate::domain::{test_gens, test_prelude, Card};

const STEPS: usize = 120;

/// Every (player, action) pair currently legal in `game`.
fn all_legal(game: &Game) -> Vec<(String, GameAction)> {
    game.player_infos()
        .iter()
        .flat_map(|pi| {
            legal_actions(game, &pi.id)
                .into_iter()
                .map(move |a| (pi.id.clone(), a))
        })
        .collect()
}

/// Random legal play-out, resolving pauses immediately. Returns every
/// state visited, including paused ones.
fn random_walk(n: usize, seed: u64, play_seed: u64) -> Vec<Game> {
    let mut rng = ChaCha8Rng::seed_from_u64(play_seed);
    let mut game = seeded_game(n, seed);
    let mut visited = vec![game.clone()];
    for _ in 0..STEPS {
        if game.pause_reason().is_some() {
            game = resolve_pause(game, T0);
            visited.push(game.clone());
            continue;
        }
        if !matches!(game, Game::Ongoing(_)) {
            break;
        }
        let options = all_legal(&game);
        let (actor, action) = options
            .choose(&mut rng)
            .cloned()
            .expect("an ongoing game always has a legal action");
        game = match apply_action_at(&game, &actor, action, T0) {
            ActionOutcome::Accepted { game, .. } => game,
            ActionOutcome::Rejected(r) => panic!("legal {action:?} by {actor} rejected: {r}"),
        };
        visited.push(game.clone());
    }
    visited
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Cards and tokens are conserved across any legal play-out.
    #[test]
    fn prop_conservation((n, seed, play_seed) in test_gens::game_seeds()) {
        let deck = deck_for_player_count(n).len();
        for game in random_walk(n, seed, play_seed) {
            let g = started(&game);
            prop_assert_eq!(g.card_count(), deck);
            prop_assert_eq!(g.token_count(), PREPARATION_TOKENS);
            prop_assert!(g.active_player < n);
        }
    }

    /// Only SWAP_EVIDENCE moves the turn, and always by one seat.
    #[test]
    fn prop_turn_advancement((n, seed, play_seed) in test_gens::game_seeds()) {
        let states = random_walk(n, seed, play_seed);
        for pair in states.windows(2) {
            let (before, after) = (started(&pair[0]), started(&pair[1]));
            let last_action = match after.events.last() {
                Some(GameEvent::Action(record)) if after.events.len() > before.events.len() => {
                    Some(record.action)
                }
                _ => None,
            };
            if matches!(last_action, Some(GameAction::SwapEvidence { .. })) {
                prop_assert_eq!(after.active_player, (before.active_player + 1) % n);
            } else {
                prop_assert_eq!(after.active_player, before.active_player);
            }
        }
    }

    /// Arbitrary submissions either commit exactly one event or change nothing.
    #[test]
    fn prop_reject_is_noop(
        (n, seed, play_seed) in test_gens::game_seeds(),
        seat in 0usize..6,
        action in test_gens::any_action(),
    ) {
        let states = random_walk(n, seed, play_seed);
        for game in states.iter().filter(|g| matches!(g, Game::Ongoing(_))) {
            let snapshot = game.clone();
            let actor = &started(game).players[seat % n].info.id;
            match apply_action_at(game, actor, action, T0) {
                ActionOutcome::Accepted { game: next, .. } => {
                    let (a, b) = (started(game), started(&next));
                    prop_assert_eq!(b.events.len(), a.events.len() + 1);
                    prop_assert_eq!(b.card_count(), a.card_count());
                    prop_assert_eq!(b.token_count(), PREPARATION_TOKENS);
                }
                ActionOutcome::Rejected(_) => {}
            }
            prop_assert_eq!(game, &snapshot);
        }
    }

    /// Other players' cards are only face-up under the reveal rules, and the
    /// Scapegoat never leaks before the end.
    #[test]
    fn prop_secrecy((n, seed, play_seed) in test_gens::game_seeds()) {
        for game in random_walk(n, seed, play_seed) {
            let g = started(&game);
            let finished = matches!(game, Game::Finished { .. });
            let paused = game.pause_reason().is_some();
            for viewer in &g.players {
                let view = project(&game, viewer.id());
                let json = serde_json::to_value(&view).unwrap();
                prop_assert_eq!(json.get("scapegoat").is_some(), finished);

                let sv = view.started().unwrap();
                for (seat, pv) in sv.players.iter().enumerate() {
                    let owner = &g.players[seat];
                    if owner.id() == viewer.id() || finished {
                        continue;
                    }
                    let spied = matches!(
                        &g.substate,
                        Substate::SpyOnPlayerConfirm { other_player_id }
                            if other_player_id == owner.id()
                                && g.players[g.active_player].id() == viewer.id()
                    );
                    for (i, card) in pv.cards.iter().enumerate() {
                        if let CardView::Up { card } = card {
                            let committed = paused && g.committed_frame_cards().iter().any(|fc| {
                                fc.player_id == owner.id() && fc.player_card_index == i
                            });
                            prop_assert!(spied || committed, "leaked {} of seat {}", card, seat);
                        }
                    }
                    prop_assert!(pv.suspect.is_none());
                }
            }
        }
    }

    /// Every enumerated legal action is accepted by the engine.
    #[test]
    fn prop_legal_actions_are_accepted((n, seed, play_seed) in test_gens::game_seeds()) {
        for game in random_walk(n, seed, play_seed).iter().filter(|g| matches!(g, Game::Ongoing(_))) {
            for (actor, action) in all_legal(game) {
                let outcome = apply_action_at(game, &actor, action, T0);
                prop_assert!(outcome.is_accepted(), "{:?} by {} rejected: {:?}", action, actor, outcome);
            }
        }
    }

    /// The frame verdict depends only on the multiset of cards.
    #[test]
    fn prop_frame_verdict_order_independent(
        colors in proptest::collection::vec(test_gens::color(), 3..=6),
        scapegoat in test_gens::color(),
        rotate in 0usize..6,
    ) {
        let cards: Vec<Card> = colors.iter().map(|&c| crate::domain::test_state_helpers::single(c)).collect();
        let n = cards.len();
        let mut rotated = cards.clone();
        rotated.rotate_left(rotate % n);
        prop_assert_eq!(frame_verdict(&cards, scapegoat, n), frame_verdict(&rotated, scapegoat, n));
        prop_assert_eq!(frame_verdict(&cards, scapegoat, n), frame_verdict(&cards, scapegoat, n));
    }
}
