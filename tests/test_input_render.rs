mod common;

use astarviz::input::{Command, Key, KeyBindings};
use astarviz::render::{grid_to_string, Renderer, TextRenderer};
use astarviz::{CellState, PathSearch};
use common::parse_layout;

#[test]
fn test_key_names_parse() {
    assert_eq!("Space".parse::<Key>(), Ok(Key::Space));
    assert_eq!("space".parse::<Key>(), Ok(Key::Space));
    assert_eq!("Esc".parse::<Key>(), Ok(Key::Escape));
    assert_eq!("Return".parse::<Key>(), Ok(Key::Enter));
    assert_eq!("c".parse::<Key>(), Ok(Key::Char('C')));
    assert_eq!("Key7".parse::<Key>(), Ok(Key::Char('7')));
    assert!("F13".parse::<Key>().is_err());
    assert!("".parse::<Key>().is_err());
    assert!("LeftShift".parse::<Key>().is_err());
}

#[test]
fn test_key_display_round_trips_through_parse() {
    for key in [Key::Space, Key::Enter, Key::Escape, Key::Backspace, Key::Tab, Key::Char('Q'), Key::Char('4')] {
        assert_eq!(key.to_string().parse::<Key>(), Ok(key));
    }
}

#[test]
fn test_default_bindings() {
    let bindings = KeyBindings::default();

    assert_eq!(bindings.command_for(Key::Space), Some(Command::StartSearch));
    assert_eq!(bindings.command_for(Key::Char('C')), Some(Command::Reset));
    assert_eq!(bindings.command_for(Key::Escape), Some(Command::Quit));
    assert_eq!(bindings.command_for(Key::Char('P')), Some(Command::CopyGrid));
    assert_eq!(bindings.command_for(Key::Enter), None);
}

#[test]
fn test_layout_text_matches_cell_states() {
    let layout = "S.#\n.#.\n..E\n";
    let (grid, _, _) = parse_layout(layout);

    assert_eq!(grid_to_string(&grid), layout);
}

#[test]
fn test_symbols_cover_every_state() {
    for state in [
        CellState::Free,
        CellState::Obstacle,
        CellState::Start,
        CellState::End,
        CellState::Frontier,
        CellState::Visited,
        CellState::Path,
    ] {
        assert_eq!(CellState::from_symbol(state.symbol()), Some(state));
    }
    assert_eq!(CellState::from_symbol('?'), None);
}

#[test]
fn test_text_renderer_keeps_frames() {
    let (mut grid, start, end) = parse_layout(
        r#"
        S..
        ##.
        E..
        "#,
    );
    let mut renderer = TextRenderer::new();
    assert_eq!(renderer.last_frame(), None);

    renderer.render(&grid);
    PathSearch::run(&mut grid, start.unwrap(), end.unwrap(), &mut astarviz::search::NoopObserver);
    renderer.render(&grid);

    assert_eq!(renderer.frames.len(), 2);
    assert_eq!(renderer.frames[0], "S..\n##.\nE..\n");
    assert_eq!(renderer.last_frame(), Some("S**\n##*\nE**\n"));
}
