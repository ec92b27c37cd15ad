use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_scroller::core::level::parse_level;
use tui_scroller::core::{SceneBuffer, Session, SimpleRng, World};
use tui_scroller::term::{FrameBuffer, GameView, Viewport};
use tui_scroller::types::Position;

/// A screen-wide level with a long floor, a few creatures, cannons and fire.
fn busy_level() -> String {
    let width = 120;
    let mut rows = vec![" ".repeat(width); 6];
    let mut put = |row: usize, col: usize, glyph: char| {
        let line = &mut rows[row];
        let mut chars: Vec<char> = line.chars().collect();
        chars[col] = glyph;
        *line = chars.into_iter().collect();
    };
    put(4, 2, 'P');
    for col in (10..width - 10).step_by(15) {
        put(4, col, 'b');
        put(1, col + 4, 'B');
        put(4, col + 7, '/');
        put(2, col + 10, '+');
    }
    put(4, width - 3, 'F');
    put(3, 60, 'L');
    rows.push("=".repeat(width));
    rows.join("\n")
}

fn bench_tick(c: &mut Criterion) {
    let text = busy_level();
    let mut session = Session::from_level_text(1, &text, 12345).unwrap();

    c.bench_function("session_tick", |b| {
        b.iter(|| {
            if session.is_over() {
                session = Session::from_level_text(1, &text, 12345).unwrap();
            }
            black_box(session.tick());
        })
    });
}

fn bench_items_at(c: &mut Criterion) {
    let world = World::from_kinds(parse_level(&busy_level(), &mut SimpleRng::new(1)));
    let column: Vec<Position> = (0..4).map(|r| Position::new(r, 60)).collect();

    c.bench_function("items_at_column", |b| {
        b.iter(|| black_box(world.items_at(black_box(&column))))
    });
}

fn bench_render(c: &mut Criterion) {
    let session = Session::from_level_text(1, &busy_level(), 12345).unwrap();
    let mut scene = SceneBuffer::new();
    let mut view = GameView::new();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("scene_render", |b| {
        b.iter(|| {
            session.render(&mut scene);
            black_box(scene.len());
        })
    });

    c.bench_function("game_view_80x24", |b| {
        b.iter(|| {
            view.render_into(&session, 0, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(benches, bench_tick, bench_items_at, bench_render);
criterion_main!(benches);
