//! Benchmarks for list layout and rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use robolist::app::{Message, Model, update};
use robolist::ui::{self, rows};

fn populated_model() -> Model {
    let mut model = Model::new(StdRng::seed_from_u64(1), (120, 60), 0);
    for _ in 0..500 {
        model = update(model, Message::Tick { subsec_millis: 0 });
    }
    update(model, Message::SearchSettled("a".to_string()))
}

fn bench_layout_rows(c: &mut Criterion) {
    let model = populated_model();
    let area = Rect::new(0, ui::SEARCH_BAR_HEIGHT, 120, ui::list_height(60));

    c.bench_function("layout_rows", |b| {
        b.iter(|| rows::layout_rows(&model, black_box(area), black_box(10_000)));
    });
}

fn bench_render(c: &mut Criterion) {
    let mut model = populated_model();
    let mut terminal = Terminal::new(TestBackend::new(120, 60)).unwrap();

    c.bench_function("render_frame", |b| {
        b.iter(|| {
            terminal
                .draw(|frame| ui::render(&mut model, frame, black_box(10_000)))
                .unwrap();
        });
    });
}

criterion_group!(benches, bench_layout_rows, bench_render);
criterion_main!(benches);
