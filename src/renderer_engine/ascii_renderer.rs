use std::io::Write;

use crate::physic_engine::{Color, FrameSnapshot};
use crate::renderer_engine::RendererEngine;

/// Rampe de glyphes, du plus faible au plus lumineux
const GLYPH_RAMP: [char; 6] = ['.', ':', '+', '*', '#', '@'];
/// Glyphe du halo autour des particules lumineuses
const GLOW_GLYPH: char = '·';
/// Valeur de `glow` pour laquelle le halo vaut la moitié de l'alpha
const GLOW_HALF_POINT: f32 = 10.0;
/// En dessous de cet alpha, une particule ne projette plus de halo
const GLOW_MIN_ALPHA: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
    intensity: f32,
}

impl Cell {
    const EMPTY: Cell = Cell {
        glyph: ' ',
        color: Color::WHITE,
        intensity: 0.0,
    };
}

/// Renderer texte : projette le viewport (pixels) sur une grille de caractères.
///
/// - le glyphe dépend de l'alpha (et légèrement de la taille),
/// - le halo (`glow`) éclaire les 8 cellules voisines,
/// - en mode ANSI, la couleur de la particule est émise en truecolor,
///   assombrie par l'intensité de la cellule.
pub struct AsciiRenderer<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
    viewport: (f32, f32),
    cells: Vec<Cell>,
    ansi: bool,
    first_frame: bool,
    frame_buf: String,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, cols: usize, rows: usize, ansi: bool) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            out,
            cols,
            rows,
            viewport: (cols as f32, rows as f32),
            cells: vec![Cell::EMPTY; cols * rows],
            ansi,
            first_frame: true,
            frame_buf: String::with_capacity(cols * rows * 20),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Cellule correspondant à une position pixel (None si hors grille)
    fn cell_index(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let (w, h) = self.viewport;
        if w <= 0.0 || h <= 0.0 || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / w * self.cols as f32) as usize;
        let row = (y / h * self.rows as f32) as usize;
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    /// Écrit dans une cellule si l'intensité est supérieure à l'existante
    fn splat(&mut self, col: usize, row: usize, cell: Cell) {
        let slot = &mut self.cells[row * self.cols + col];
        if cell.intensity > slot.intensity {
            *slot = cell;
        }
    }

    fn glyph_for(alpha: f32, size: f32) -> char {
        let last = GLYPH_RAMP.len() - 1;
        // les grosses particules montent d'un cran
        let bump = usize::from(size >= 2.0);
        let idx = (alpha.clamp(0.0, 1.0) * last as f32).round() as usize + bump;
        GLYPH_RAMP[idx.min(last)]
    }

    fn rasterize(&mut self, snapshot: &FrameSnapshot<'_>) -> usize {
        self.cells.fill(Cell::EMPTY);
        let mut drawn = 0;

        for p in snapshot.iter() {
            let Some((col, row)) = self.cell_index(p.pos.x, p.pos.y) else {
                continue;
            };
            drawn += 1;

            if p.glow > 0.0 && p.alpha >= GLOW_MIN_ALPHA {
                let halo = Cell {
                    glyph: GLOW_GLYPH,
                    color: p.color,
                    intensity: p.alpha * p.glow / (p.glow + GLOW_HALF_POINT),
                };
                for (dc, dr) in NEIGHBOURS {
                    let (c, r) = (col as isize + dc, row as isize + dr);
                    if (0..self.cols as isize).contains(&c) && (0..self.rows as isize).contains(&r)
                    {
                        self.splat(c as usize, r as usize, halo);
                    }
                }
            }

            self.splat(
                col,
                row,
                Cell {
                    glyph: Self::glyph_for(p.alpha, p.size),
                    color: p.color,
                    intensity: p.alpha,
                },
            );
        }
        drawn
    }

    fn compose(&mut self) {
        use std::fmt::Write as _;

        self.frame_buf.clear();
        if self.ansi {
            if self.first_frame {
                // efface l'écran une seule fois, ensuite on repositionne le curseur
                self.frame_buf.push_str("\x1b[2J");
            }
            self.frame_buf.push_str("\x1b[H");
        }

        for row in self.cells.chunks(self.cols) {
            for cell in row {
                if self.ansi && cell.intensity > 0.0 {
                    let c = cell.color.scaled(cell.intensity);
                    // l'écriture dans une String ne peut pas échouer
                    let _ = write!(self.frame_buf, "\x1b[38;2;{};{};{}m{}", c.r, c.g, c.b, cell.glyph);
                } else {
                    self.frame_buf.push(cell.glyph);
                }
            }
            if self.ansi {
                self.frame_buf.push_str("\x1b[0m");
            }
            self.frame_buf.push('\n');
        }
    }
}

const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl<W: Write> RendererEngine for AsciiRenderer<W> {
    fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width.max(0.0), height.max(0.0));
    }

    fn render_frame(&mut self, snapshot: &FrameSnapshot<'_>) -> anyhow::Result<usize> {
        let drawn = self.rasterize(snapshot);
        self.compose();
        self.out.write_all(self.frame_buf.as_bytes())?;
        self.out.flush()?;
        self.first_frame = false;
        Ok(drawn)
    }

    fn close(&mut self) {
        if self.ansi {
            // on rend un terminal propre
            let _ = self.out.write_all(b"\x1b[0m\n");
            let _ = self.out.flush();
        }
    }
}
