//! Activation: turns a lobby into a dealt, seated ONGOING game.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::domain::catalogue::deck_for_player_count;
use crate::domain::rules::{starting_locations, PLAYER_COUNT_RANGE, PREPARATION_TOKENS, STASH_SIZE};
use crate::domain::state::{
    Area, Game, Location, LocationName, Player, PlayerInfo, StartedGame, Substate,
};
use crate::domain::{Card, PlayerColor};

/// Activate with the thread-local RNG.
///
/// # Panics
///
/// See [`activate_with_rng`].
pub fn activate(game: Game) -> Game {
    activate_with_rng(game, &mut rand::rng())
}

/// Shuffle seats, assign colors and the hidden Scapegoat, then deal.
///
/// # Panics
///
/// Panics if `game` is not WAITING_FOR_PLAYERS or the lobby size is outside
/// 3..=6. Both are caller contract violations; the table layer checks them
/// before calling.
pub fn activate_with_rng<R: Rng + ?Sized>(game: Game, rng: &mut R) -> Game {
    let lobby = match game {
        Game::WaitingForPlayers(lobby) => lobby,
        other => panic!(
            "cannot activate game {} in state {}",
            other.id(),
            other.status()
        ),
    };
    let player_count = lobby.player_infos.len();
    assert!(
        PLAYER_COUNT_RANGE.contains(&player_count),
        "cannot activate game {} with {player_count} players",
        lobby.id
    );

    let mut seating = lobby.player_infos.clone();
    seating.shuffle(rng);

    let mut colors = PlayerColor::ALL[..player_count].to_vec();
    colors.shuffle(rng);
    let scapegoat = *colors
        .choose(rng)
        .unwrap_or_else(|| unreachable!("player_count >= 3"));

    let mut deck = deck_for_player_count(player_count);
    deck.shuffle(rng);
    let (locations, mut rest) = deal_locations(deck);

    let hand_size = rest.len() / player_count;
    debug_assert_eq!(rest.len() % player_count, 0);
    let seats = starting_locations(player_count)
        .unwrap_or_else(|| unreachable!("player count checked above"));

    let players = seating
        .into_iter()
        .zip(colors.iter().copied())
        .zip(seats.iter().copied())
        .map(|((info, color), location)| {
            let suspect = if color == scapegoat {
                pick_false_suspect(&colors, scapegoat, rng)
            } else {
                scapegoat
            };
            Player {
                info,
                color,
                suspect,
                preparation_tokens: 0,
                hand: rest.drain(..hand_size).collect(),
                location,
            }
        })
        .collect();

    let started = StartedGame {
        id: lobby.id,
        player_infos: lobby.player_infos,
        substate: Substate::GoToLocation,
        active_player: 0,
        players,
        locations,
        preparation_token_pool: PREPARATION_TOKENS,
        events: Vec::new(),
        scapegoat,
    };
    started.debug_assert_invariants();
    Game::Ongoing(started)
}

/// A random seated color other than the Scapegoat's own.
fn pick_false_suspect<R: Rng + ?Sized>(
    colors: &[PlayerColor],
    scapegoat: PlayerColor,
    rng: &mut R,
) -> PlayerColor {
    let others: Vec<PlayerColor> = colors.iter().copied().filter(|&c| c != scapegoat).collect();
    *others
        .choose(rng)
        .unwrap_or_else(|| unreachable!("at least two seated colors"))
}

/// Deal the first cards of a shuffled deck onto the table.
///
/// Order: PREPARE, TRADE, SPY, STASH face-up, then the hidden stash.
fn deal_locations(deck: Vec<Card>) -> (Vec<Location>, Vec<Card>) {
    let mut cards = deck.into_iter();
    let mut next = || {
        cards
            .next()
            .unwrap_or_else(|| unreachable!("filtered deck always covers the table"))
    };

    let prepare = Location::evidence(LocationName::Prepare, next());
    let trade = Location::evidence(LocationName::Trade, next());
    let spy = Location::evidence(LocationName::Spy, next());
    let stash_card = next();
    let hidden: [Option<Card>; STASH_SIZE] = std::array::from_fn(|_| Some(next()));
    let stash = Location {
        name: LocationName::Stash,
        area: Area::Stash {
            card: stash_card,
            hidden,
        },
    };
    let cops = Location {
        name: LocationName::Cops,
        area: Area::Cops,
    };

    (vec![prepare, trade, spy, stash, cops], cards.collect())
}

/// Convenience for callers that only have player infos.
pub fn activate_new(player_infos: Vec<PlayerInfo>) -> Game {
    activate(Game::new_lobby(player_infos))
}
