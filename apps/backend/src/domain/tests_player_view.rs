use serde_json::Value;

use crate::domain::actions::GameAction;
use crate::domain::player_view::{project, CardView, GameView, StartedView};
use crate::domain::resolution::resolve_cops_check;
use crate::domain::state::{Game, GameStatus, LocationName};
use crate::domain::test_state_helpers::{
    accept, drain_pool, id_at, infos, place, seeded_game, started, T0,
};

fn view_of(game: &Game, viewer: &str) -> StartedView {
    project(game, viewer)
        .started()
        .cloned()
        .expect("started view")
}

fn all_up(cards: &[CardView]) -> bool {
    cards.iter().all(|c| matches!(c, CardView::Up { .. }))
}

fn all_down(cards: &[CardView]) -> bool {
    cards.iter().all(|c| matches!(c, CardView::Down))
}

fn contains_key(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key) || map.values().any(|v| contains_key(v, key)),
        Value::Array(items) => items.iter().any(|v| contains_key(v, key)),
        _ => false,
    }
}

#[test]
fn viewer_sees_only_own_hand_and_suspect() {
    let game = seeded_game(4, 30);
    let viewer = id_at(&game, 1);
    let view = view_of(&game, &viewer);

    for (seat, p) in view.players.iter().enumerate() {
        if seat == 1 {
            assert!(p.me);
            assert!(all_up(&p.cards));
            assert_eq!(p.suspect, Some(started(&game).players[1].suspect));
        } else {
            assert!(!p.me);
            assert!(all_down(&p.cards));
            assert_eq!(p.suspect, None);
        }
        assert_eq!(p.cards.len(), started(&game).players[seat].hand_len());
    }
}

#[test]
fn scapegoat_key_absent_until_finished() {
    let game = seeded_game(3, 31);
    let viewer = id_at(&game, 0);
    for g in [
        game.clone(),
        accept(
            &game,
            &viewer,
            GameAction::GoToLocation {
                location: LocationName::Cops,
            },
        ),
    ] {
        let json = serde_json::to_value(project(&g, &viewer)).unwrap();
        assert!(!contains_key(&json, "scapegoat"), "{json}");
    }

    let paused = accept(
        &game,
        &viewer,
        GameAction::GoToLocation {
            location: LocationName::Cops,
        },
    );
    let finished = resolve_cops_check(paused, T0);
    let json = serde_json::to_value(project(&finished, &viewer)).unwrap();
    assert_eq!(json["state"], "FINISHED");
    assert_eq!(json["scapegoat"], started(&finished).scapegoat.as_str());
    assert!(json["winnerPlayerIds"].is_array());
}

#[test]
fn finished_game_reveals_everything() {
    let game = seeded_game(5, 32);
    let paused = accept(
        &game,
        &id_at(&game, 0),
        GameAction::GoToLocation {
            location: LocationName::Cops,
        },
    );
    let finished = resolve_cops_check(paused, T0);
    let view = view_of(&finished, &id_at(&finished, 3));
    assert!(view.players.iter().all(|p| all_up(&p.cards)));
    assert!(view.players.iter().all(|p| p.suspect.is_some()));
    assert_eq!(project(&finished, "anyone").status(), GameStatus::Finished);
}

#[test]
fn spied_hand_is_visible_only_to_the_spy() {
    let game = seeded_game(3, 33);
    let spy = id_at(&game, 0);
    let game = accept(
        &game,
        &spy,
        GameAction::GoToLocation {
            location: LocationName::Spy,
        },
    );
    let game = accept(
        &game,
        &spy,
        GameAction::SpyOnPlayer {
            player_color: started(&game).players[1].color,
        },
    );

    assert!(all_up(&view_of(&game, &spy).players[1].cards));
    assert!(all_down(&view_of(&game, &spy).players[2].cards));
    assert!(all_down(&view_of(&game, &id_at(&game, 2)).players[1].cards));
    assert!(all_down(&view_of(&game, &id_at(&game, 1)).players[0].cards));

    let game = accept(&game, &spy, GameAction::SpyOnPlayerConfirm);
    assert!(all_down(&view_of(&game, &spy).players[1].cards));
}

#[test]
fn committed_frame_cards_are_public_only_while_paused() {
    let mut game = seeded_game(3, 34);
    drain_pool(&mut game, 0, 1, 1);
    place(&mut game, 0, LocationName::Trade);
    let (p0, p1, p2) = (id_at(&game, 0), id_at(&game, 1), id_at(&game, 2));
    let game = accept(
        &game,
        &p0,
        GameAction::GoToLocation {
            location: LocationName::FrameSteal,
        },
    );
    let frame = |i| GameAction::FrameChooseCard {
        player_card_index: i,
    };
    let game = accept(&game, &p1, frame(1));
    assert!(all_down(&view_of(&game, &p2).players[1].cards));

    let game = accept(&game, &p2, frame(0));
    let game = accept(&game, &p0, frame(0));
    assert_eq!(game.status(), GameStatus::PausedForFrameCheck);

    let view = view_of(&game, &p2);
    assert_eq!(view.players[1].cards[0], CardView::Down);
    assert!(matches!(view.players[1].cards[1], CardView::Up { .. }));
    assert!(matches!(view.players[0].cards[0], CardView::Up { .. }));
    assert_eq!(view.players[0].cards[1], CardView::Down);

    let json = serde_json::to_value(project(&game, &p2)).unwrap();
    assert_eq!(json["frameCards"].as_array().map(Vec::len), Some(3));
}

#[test]
fn stash_slots_stay_face_down_for_everyone() {
    let game = seeded_game(4, 35);
    let p0 = id_at(&game, 0);
    let game = accept(
        &game,
        &p0,
        GameAction::GoToLocation {
            location: LocationName::Stash,
        },
    );
    for viewer in [p0.as_str(), "spectator"] {
        let view = view_of(&game, viewer);
        let stash = view
            .locations
            .iter()
            .find(|l| l.name == LocationName::Stash)
            .unwrap();
        assert!(matches!(stash.card, Some(CardView::Up { .. })));
        let hidden = stash.stash.as_ref().unwrap();
        assert_eq!(hidden.len(), 3);
        assert!(all_down(hidden));
    }

    let game = accept(&game, &p0, GameAction::StashChooseCard { stash_card_index: 0 });
    let view = view_of(&game, &p0);
    let stash = view
        .locations
        .iter()
        .find(|l| l.name == LocationName::Stash)
        .unwrap();
    assert_eq!(stash.stash.as_ref().map(Vec::len), Some(2));
}

#[test]
fn waiting_game_passes_through() {
    let lobby = Game::new_lobby(infos(2));
    match project(&lobby, "p1") {
        GameView::WaitingForPlayers { id, player_infos } => {
            assert_eq!(id, lobby.id());
            assert_eq!(player_infos, infos(2));
        }
        other => panic!("unexpected view {:?}", other.status()),
    }
}

#[test]
fn view_serializes_in_client_shape() {
    let game = seeded_game(3, 36);
    let viewer = id_at(&game, 0);
    let json = serde_json::to_value(project(&game, &viewer)).unwrap();
    assert_eq!(json["state"], "ONGOING");
    assert_eq!(json["substate"]["expectedAction"], "GO_TO_LOCATION");
    assert_eq!(json["activePlayer"], 0);
    assert_eq!(json["preparationTokenPool"], 2);
    assert_eq!(json["locations"][0]["name"], "PREPARE");
    assert_eq!(json["locations"][0]["userFacingName"], "Prepare to Frame");
    assert_eq!(json["locations"][0]["card"]["face"], "UP");
    assert_eq!(json["locations"][4]["name"], "COPS");
    assert!(json["locations"][4].get("card").is_none());
    assert_eq!(json["players"][0]["me"], true);
    assert_eq!(json["players"][1]["cards"][0]["face"], "DOWN");
    assert!(json["players"][1].get("suspect").is_none());
}

#[test]
fn unknown_viewer_sees_no_hands() {
    let game = seeded_game(6, 37);
    let view = view_of(&game, "spectator");
    assert!(view.me().is_none());
    assert!(view.players.iter().all(|p| all_down(&p.cards)));
}
