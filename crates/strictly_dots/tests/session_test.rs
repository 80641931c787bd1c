//! Scenario tests for the game session.

use strictly_dots::{
    BoxCoord, ClaimedBox, Edge, ErrorKind, FirstAvailable, GameError, GameSession, Outcome,
    Player, RandomPolicy, Scores, TurnState,
};

/// A session whose computer seat follows a fixed list of edges.
#[derive(Debug)]
struct Scripted {
    edges: Vec<Edge>,
}

impl strictly_dots::OpponentPolicy for Scripted {
    fn choose_move(&mut self, _board: &strictly_dots::Board) -> Result<Edge, GameError> {
        if self.edges.is_empty() {
            return Err(GameError::NoLegalMoves);
        }
        Ok(self.edges.remove(0))
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

fn scripted(edges: &[Edge]) -> GameSession<Scripted> {
    GameSession::with_opponent(
        5,
        Scripted {
            edges: edges.to_vec(),
        },
    )
    .expect("5x5 grid is valid")
}

/// Plays H(0,0), H(1,0), V(0,0), V(0,1) with the player drawing first and
/// fourth and the computer drawing the two in between.
fn player_claims_first_box() -> GameSession<Scripted> {
    let mut session = scripted(&[Edge::horizontal(1, 0), Edge::vertical(0, 0)]);

    let outcome = session
        .submit_player_move(Edge::horizontal(0, 0))
        .expect("Valid move");
    assert_eq!(outcome.turn(), TurnState::ComputerTurn);

    let outcome = session.request_computer_move().expect("Valid move");
    assert!(outcome.completed().is_empty());
    assert_eq!(outcome.turn(), TurnState::PlayerTurn);

    // Player skips V(0,0) by drawing elsewhere, so the computer draws it.
    session
        .submit_player_move(Edge::vertical(3, 4))
        .expect("Valid move");
    session.request_computer_move().expect("Valid move");
    assert_eq!(session.turn(), TurnState::PlayerTurn);

    session
}

#[test]
fn test_fourth_side_completes_box_and_keeps_turn() {
    let mut session = player_claims_first_box();

    let outcome = session
        .submit_player_move(Edge::vertical(0, 1))
        .expect("Valid move");

    assert_eq!(
        outcome.completed(),
        &vec![ClaimedBox::new(0, 0, Player::Human)]
    );
    assert_eq!(outcome.turn(), TurnState::PlayerTurn);
    assert!(outcome.extra_turn());
    assert_eq!(session.scores().human, 1);
    assert_eq!(
        session.board().box_owner(BoxCoord::new(0, 0)),
        Ok(Some(Player::Human))
    );
}

#[test]
fn test_player_scenario_all_four_edges_by_player() {
    // The computer only draws far away, so the player draws all four sides.
    let mut session = scripted(&[
        Edge::horizontal(4, 3),
        Edge::horizontal(4, 2),
        Edge::horizontal(4, 1),
    ]);
    let sides = [
        Edge::horizontal(0, 0),
        Edge::horizontal(1, 0),
        Edge::vertical(0, 0),
    ];
    for side in sides {
        session.submit_player_move(side).expect("Valid move");
        session.request_computer_move().expect("Valid move");
    }

    let outcome = session
        .submit_player_move(Edge::vertical(0, 1))
        .expect("Valid move");
    assert_eq!(outcome.completed().len(), 1);
    assert_eq!(outcome.completed()[0].coord(), BoxCoord::new(0, 0));
    assert_eq!(session.turn(), TurnState::PlayerTurn);
    assert_eq!(session.scores().human, 1);
}

#[test]
fn test_redrawing_edge_fails_and_changes_nothing() {
    let mut session = player_claims_first_box();
    session
        .submit_player_move(Edge::vertical(0, 1))
        .expect("Valid move");

    let scores = session.scores();
    let turn = session.turn();
    let drawn = session.board().drawn_count();
    let history = session.history().len();

    let result = session.submit_player_move(Edge::horizontal(0, 0));
    assert_eq!(
        result,
        Err(GameError::AlreadyDrawn(Edge::horizontal(0, 0)))
    );

    assert_eq!(session.scores(), scores);
    assert_eq!(session.turn(), turn);
    assert_eq!(session.board().drawn_count(), drawn);
    assert_eq!(session.history().len(), history);
}

#[test]
fn test_computer_move_on_player_turn_rejected() {
    let mut session = GameSession::with_opponent(5, FirstAvailable).unwrap();
    let result = session.request_computer_move();
    assert_eq!(result, Err(GameError::NotYourTurn(Player::Computer)));
    assert_eq!(session.board().drawn_count(), 0);
    assert_eq!(session.turn(), TurnState::PlayerTurn);
}

#[test]
fn test_player_move_on_computer_turn_rejected() {
    let mut session = GameSession::with_opponent(5, FirstAvailable).unwrap();
    session.submit_player_move(Edge::vertical(2, 2)).unwrap();
    let result = session.submit_player_move(Edge::vertical(2, 3));
    assert_eq!(result, Err(GameError::NotYourTurn(Player::Human)));
    assert_eq!(session.board().drawn_count(), 1);
}

#[test]
fn test_invalid_edge_rejected() {
    let mut session = GameSession::with_opponent(5, FirstAvailable).unwrap();
    let result = session.submit_player_move(Edge::vertical(4, 0));
    assert_eq!(result, Err(GameError::InvalidEdge(Edge::vertical(4, 0))));
    assert_eq!(session.turn(), TurnState::PlayerTurn);
}

#[test]
fn test_invalid_grid_size_rejected() {
    assert!(matches!(
        GameSession::new(1),
        Err(GameError::InvalidGridSize(1))
    ));
    assert!(matches!(
        GameSession::with_opponent(usize::MAX, FirstAvailable),
        Err(GameError::InvalidGridSize(usize::MAX))
    ));
}

#[test]
fn test_moves_after_game_over_rejected() {
    // 2x2 dots: one box, four edges. FirstAvailable draws H(0,0) first.
    let mut session = GameSession::with_opponent(2, FirstAvailable).unwrap();
    session.submit_player_move(Edge::vertical(0, 0)).unwrap();
    session.play_computer_turn().unwrap();
    session.submit_player_move(Edge::vertical(0, 1)).unwrap();
    let outcomes = session.play_computer_turn().unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_game_over());
    assert_eq!(
        outcomes[0].outcome(),
        Some(Outcome::Winner(Player::Computer))
    );
    assert_eq!(session.result(), Some(Outcome::Winner(Player::Computer)));

    assert_eq!(
        session.submit_player_move(Edge::horizontal(0, 0)),
        Err(GameError::NotYourTurn(Player::Human))
    );
    assert_eq!(
        session.request_computer_move(),
        Err(GameError::NotYourTurn(Player::Computer))
    );
}

#[test]
fn test_report_shapes() {
    let mut session = GameSession::with_opponent(5, FirstAvailable).unwrap();

    let attempt = session.submit_player_move(Edge::horizontal(0, 0));
    let report = session.report(attempt);
    assert!(report.accepted());
    assert_eq!(report.error(), None);
    assert_eq!(report.turn_after(), TurnState::ComputerTurn);

    let attempt = session.submit_player_move(Edge::horizontal(0, 1));
    let report = session.report(attempt);
    assert!(!report.accepted());
    assert_eq!(report.error(), Some(ErrorKind::NotYourTurn));
    assert_eq!(report.score_after(), Scores::default());
    assert!(report.message().as_deref().is_some_and(|m| m.contains("turn")));
}

#[test]
fn test_full_random_game_claims_every_box() {
    for seed in 0..20 {
        let mut session = GameSession::with_opponent(5, RandomPolicy::seeded(seed)).unwrap();
        let mut human = RandomPolicy::seeded(seed + 1000);

        while !session.is_over() {
            match session.turn() {
                TurnState::PlayerTurn => {
                    let edge =
                        strictly_dots::OpponentPolicy::choose_move(&mut human, session.board())
                            .unwrap();
                    session.submit_player_move(edge).unwrap();
                }
                TurnState::ComputerTurn => {
                    session.play_computer_turn().unwrap();
                }
                TurnState::GameOver => unreachable!(),
            }
        }

        let scores = session.scores();
        assert_eq!(session.board().drawn_count(), 40);
        assert_eq!(scores.total(), 16);
        assert!(session.board().boxes().all(|(_, owner)| owner.is_some()));

        match session.result().unwrap() {
            Outcome::Winner(Player::Human) => assert!(scores.human >= 9),
            Outcome::Winner(Player::Computer) => assert!(scores.computer >= 9),
            Outcome::Draw => assert_eq!((scores.human, scores.computer), (8, 8)),
        }
    }
}
