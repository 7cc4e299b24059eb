// PPU benchmarks: scanline composition and full-frame cost

use criterion::{criterion_group, criterion_main, Criterion};
use famicore::Ppu;
use std::hint::black_box;

/// A PPU with rendering enabled and a busy nametable
fn busy_ppu() -> Ppu {
    let mut ppu = Ppu::new();
    ppu.set_ready();
    ppu.attach_pattern_memory(&[0xAA; 0x2000], true);
    ppu.write_register(1, 0x18); // PPUMASK: background + sprites

    // Tile indices over the whole first nametable
    ppu.write_register(6, 0x20);
    ppu.write_register(6, 0x00);
    for i in 0..0x3C0u16 {
        ppu.write_register(7, (i % 256) as u8);
    }

    // A diagonal of sprites
    for sprite in 0..64usize {
        ppu.oam[sprite * 4] = (sprite * 3 % 232) as u8;
        ppu.oam[sprite * 4 + 1] = sprite as u8;
        ppu.oam[sprite * 4 + 3] = (sprite * 4 % 248) as u8;
    }
    ppu
}

fn bench_ppu_scanline(c: &mut Criterion) {
    c.bench_function("tick_scanline_visible", |b| {
        let mut ppu = busy_ppu();
        b.iter(|| {
            black_box(&mut ppu).tick_scanline();
            if ppu.frame_pixels().1.len() > 1 << 20 {
                ppu.clear_frame();
            }
        });
    });
}

fn bench_ppu_frame(c: &mut Criterion) {
    c.bench_function("full_frame_262_lines", |b| {
        let mut ppu = busy_ppu();
        b.iter(|| {
            for _ in 0..262 {
                black_box(&mut ppu).tick_scanline();
            }
            ppu.take_frame_complete();
            ppu.clear_frame();
        });
    });
}

criterion_group!(benches, bench_ppu_scanline, bench_ppu_frame);
criterion_main!(benches);
