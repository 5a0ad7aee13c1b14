// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lower depth autocorrection.
//!
//! Select hills with the lower depth at sea level, then select across a deep ravine.
//! The first selection offers to raise the lower depth to the lowest visible ground;
//! the second offers to drop it to the ravine floor.
//!
//! Run:
//! - `cargo run -p strata_demos --example autocorrect`

use kurbo::{Point, Size};
use strata_demos::{ConsoleUi, Hills, HillsRenderer};
use strata_select::autocorrect::Choice;
use strata_select::drag::PointerButton;
use strata_select::{InputEvent, Session, WorldInfo};
use strata_view::{Column, ViewConfig, transform};

fn select<R, S, U>(session: &mut Session<R, S, U>, from: Column, to: Column)
where
    R: strata_select::MapRenderer,
    S: strata_view::ColumnSampler,
    U: strata_select::Ui,
{
    let view = session.view();
    let (a, b) = (
        transform::world_to_screen(from, view),
        transform::world_to_screen(to, view),
    );
    session.handle(InputEvent::PointerDown {
        button: PointerButton::Secondary,
        position: a,
    });
    session.handle(InputEvent::PointerMove { position: b });
    session.handle(InputEvent::PointerUp {
        button: PointerButton::Secondary,
        position: b,
    });
}

fn main() {
    env_logger::init();

    let ui = ConsoleUi {
        answer: Choice::Accept,
    };
    let mut session = Session::new(
        &ViewConfig::default(),
        Size::new(200.0, 200.0),
        HillsRenderer::default(),
        Hills,
        ui,
    )
    .expect("default configuration is valid");
    session.load_world(
        WorldInfo {
            spawn: Point::new(40.0, 0.0),
            player: Point::ORIGIN,
        },
        false,
    );

    println!("lower depth before: {}", session.view().lower_depth());
    select(&mut session, Column::new(30, -5), Column::new(45, 5));
    println!("after hills: {}", session.view().lower_depth());

    select(&mut session, Column::new(5, -5), Column::new(20, 5));
    println!("after ravine: {}", session.view().lower_depth());
    assert_eq!(session.view().lower_depth(), 18);

    session.ui_mut().answer = Choice::DisableFuture;
    session.set_lower_depth(62);
    select(&mut session, Column::new(-40, -5), Column::new(-20, 5));
    println!(
        "prompts enabled: {}, lower depth {}",
        session.autocorrect_enabled(),
        session.view().lower_depth()
    );
}
