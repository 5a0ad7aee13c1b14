// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection basics.
//!
//! Load a world, zoom and pan, draw a selection, widen it by dragging an edge,
//! then edit its bounds the way an export dialog would.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p strata_demos --example select_basics`

use kurbo::{Point, Size};
use strata_demos::{ConsoleUi, HillsRenderer};
use strata_select::autocorrect::Choice;
use strata_select::drag::PointerButton;
use strata_select::keys::{Key, Modifiers};
use strata_select::{Actions, InputEvent, Session, WorldInfo};
use strata_view::ViewConfig;

fn main() {
    env_logger::init();

    let ui = ConsoleUi {
        answer: Choice::Decline,
    };
    let mut session = Session::new(
        &ViewConfig::default(),
        Size::new(320.0, 240.0),
        HillsRenderer::default(),
        strata_demos::Hills,
        ui,
    )
    .expect("default configuration is valid");

    session.load_world(
        WorldInfo {
            spawn: Point::new(8.0, -4.0),
            player: Point::new(40.0, 12.0),
        },
        false,
    );
    println!("actions after load: {:?}", session.available_actions());

    // Two notches in, then pan east with the keyboard.
    session.handle(InputEvent::Wheel { delta: 240.0 });
    let d = Key::Char('d');
    session.handle(InputEvent::KeyDown {
        key: d,
        modifiers: Modifiers::empty(),
    });
    session.handle(InputEvent::KeyUp { key: d });
    println!(
        "view: center {:?}, scale {:.2}",
        session.view().center,
        session.view().scale()
    );

    // Draw a selection with the secondary button.
    let from = Point::new(140.0, 100.0);
    let to = Point::new(200.0, 160.0);
    session.handle(InputEvent::PointerDown {
        button: PointerButton::Secondary,
        position: from,
    });
    session.handle(InputEvent::PointerMove { position: to });
    session.handle(InputEvent::PointerUp {
        button: PointerButton::Secondary,
        position: to,
    });
    println!("selected: {:?}", session.export_box());
    if let Some(status) = session.status() {
        println!("status: {status}");
    }

    // Grab the east edge and pull it further out.
    let edge = Point::new(to.x + 1.0, 130.0);
    let out = Point::new(260.0, 130.0);
    session.handle(InputEvent::PointerDown {
        button: PointerButton::Secondary,
        position: edge,
    });
    session.handle(InputEvent::PointerMove { position: out });
    session.handle(InputEvent::PointerUp {
        button: PointerButton::Secondary,
        position: out,
    });
    println!("widened: {:?}", session.export_box());

    // An export dialog trims the vertical range.
    if let Some(mut bounds) = session.export_box() {
        bounds.min_y = 50;
        bounds.max_y = 90;
        session.apply_export_edit(bounds);
    }
    println!(
        "after export: depths {:?}, box {:?}",
        session.view().depth_bounds(),
        session.export_box()
    );
    assert!(session.available_actions().contains(Actions::REPEAT_EXPORT));
}
