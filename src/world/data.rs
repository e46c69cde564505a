//! Map layout parsing and level planning.
//!
//! A level is described by four CSV layers of equal size. Planning turns the
//! layers into a flat list of placements without touching the ECS, so every
//! rule about codes, dimensions, and spawn counts is checked before a single
//! entity exists.

use bevy::prelude::*;
use rand::Rng;
use std::fmt;
use std::fs;

use super::error::LevelError;
use crate::core::{MapFiles, Species};

/// Cell value marking an empty cell.
pub const EMPTY_CELL: &str = "-1";

/// Entities-layer code of the player spawn.
pub const PLAYER_CODE: &str = "394";

/// The four layout layers, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutLayer {
    Boundary,
    Grass,
    Object,
    Entities,
}

impl LayoutLayer {
    /// Processing order; obstacle membership accumulates in this order.
    pub const ORDER: [LayoutLayer; 4] = [
        LayoutLayer::Boundary,
        LayoutLayer::Grass,
        LayoutLayer::Object,
        LayoutLayer::Entities,
    ];
}

impl fmt::Display for LayoutLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutLayer::Boundary => "boundary",
            LayoutLayer::Grass => "grass",
            LayoutLayer::Object => "object",
            LayoutLayer::Entities => "entities",
        };
        f.write_str(name)
    }
}

/// One parsed CSV layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutGrid {
    pub rows: Vec<Vec<String>>,
}

impl LayoutGrid {
    /// Parse comma separated rows. Blank lines are skipped, cells are trimmed.
    pub fn parse(text: &str) -> Self {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.split(',').map(|cell| cell.trim().to_string()).collect())
            .collect();
        Self { rows }
    }

    /// Read and parse a CSV layer from disk.
    pub fn load(path: &str) -> Result<Self, LevelError> {
        fs::read_to_string(path)
            .map(|contents| Self::parse(&contents))
            .map_err(|e| LevelError::ReadError {
                path: path.to_string(),
                details: e.to_string(),
            })
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Non-empty cells as `(row, col, code)`, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| !is_empty_cell(cell))
                .map(move |(col, cell)| (row, col, cell.as_str()))
        })
    }
}

fn is_empty_cell(cell: &str) -> bool {
    cell == EMPTY_CELL || cell.is_empty()
}

/// The four layers of one map.
#[derive(Debug, Clone, Default)]
pub struct LevelLayouts {
    pub boundary: LayoutGrid,
    pub grass: LayoutGrid,
    pub object: LayoutGrid,
    pub entities: LayoutGrid,
}

impl LevelLayouts {
    /// Load every layer named in the map settings.
    pub fn load(files: &MapFiles) -> Result<Self, LevelError> {
        Ok(Self {
            boundary: LayoutGrid::load(&files.boundary)?,
            grass: LayoutGrid::load(&files.grass)?,
            object: LayoutGrid::load(&files.object)?,
            entities: LayoutGrid::load(&files.entities)?,
        })
    }

    pub fn layer(&self, layer: LayoutLayer) -> &LayoutGrid {
        match layer {
            LayoutLayer::Boundary => &self.boundary,
            LayoutLayer::Grass => &self.grass,
            LayoutLayer::Object => &self.object,
            LayoutLayer::Entities => &self.entities,
        }
    }

    /// Every layer must have the boundary layer's dimensions, with every row
    /// exactly as wide as the boundary layer.
    pub fn validate_dimensions(&self) -> Result<(), LevelError> {
        let expected_width = self.boundary.width();
        let expected_height = self.boundary.height();

        for layer in LayoutLayer::ORDER {
            let grid = self.layer(layer);
            if grid.width() != expected_width || grid.height() != expected_height {
                return Err(LevelError::GridMismatch {
                    layer,
                    expected_width,
                    expected_height,
                    actual_width: grid.width(),
                    actual_height: grid.height(),
                });
            }
            if let Some((row, cells)) = grid
                .rows
                .iter()
                .enumerate()
                .find(|(_, cells)| cells.len() != expected_width)
            {
                return Err(LevelError::RaggedRow {
                    layer,
                    row,
                    expected: expected_width,
                    actual: cells.len(),
                });
            }
        }
        Ok(())
    }
}

/// How many images each tile category offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicsCounts {
    pub grass: usize,
    pub objects: usize,
}

/// What to spawn in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    /// Invisible collision tile
    Boundary,
    /// Attackable grass using `grass[variant]`
    Grass { variant: usize },
    /// Object using `objects[graphic]`
    Object { graphic: usize },
    Player,
    Enemy(Species),
}

/// One entity or tile to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top-left of the grid cell in world pixels
    pub position: Vec2,
    pub kind: PlacementKind,
}

/// Validated placements for a whole level.
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelPlan {
    pub placements: Vec<Placement>,
}

impl LevelPlan {
    pub fn count(&self, predicate: impl Fn(&PlacementKind) -> bool) -> usize {
        self.placements.iter().filter(|p| predicate(&p.kind)).count()
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.placements
            .iter()
            .find(|p| p.kind == PlacementKind::Player)
            .map(|p| p.position)
    }
}

/// Turn the layout layers into placements.
///
/// Layers are processed boundary, grass, object, entities; within a layer
/// cells are visited row by row. Grass variants are drawn from `rng`.
pub fn plan_level(
    layouts: &LevelLayouts,
    graphics: GraphicsCounts,
    tile_size: f32,
    rng: &mut impl Rng,
) -> Result<LevelPlan, LevelError> {
    layouts.validate_dimensions()?;

    let mut placements = Vec::new();
    for layer in LayoutLayer::ORDER {
        for (row, col, code) in layouts.layer(layer).occupied() {
            let position = Vec2::new(col as f32 * tile_size, row as f32 * tile_size);

            let kind = match layer {
                LayoutLayer::Boundary => PlacementKind::Boundary,
                LayoutLayer::Grass => {
                    if graphics.grass == 0 {
                        return Err(LevelError::MissingGraphics("grass"));
                    }
                    PlacementKind::Grass {
                        variant: rng.gen_range(0..graphics.grass),
                    }
                }
                LayoutLayer::Object => {
                    let graphic = code
                        .parse::<usize>()
                        .ok()
                        .filter(|index| *index < graphics.objects)
                        .ok_or_else(|| LevelError::GraphicOutOfRange {
                            code: code.to_string(),
                            col,
                            row,
                            count: graphics.objects,
                        })?;
                    PlacementKind::Object { graphic }
                }
                LayoutLayer::Entities if code == PLAYER_CODE => PlacementKind::Player,
                LayoutLayer::Entities => PlacementKind::Enemy(Species::from_code(code)),
            };

            placements.push(Placement { position, kind });
        }
    }

    let plan = LevelPlan { placements };
    let players = plan.count(|kind| *kind == PlacementKind::Player);
    if players != 1 {
        return Err(LevelError::PlayerSpawnCount(players));
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const COUNTS: GraphicsCounts = GraphicsCounts { grass: 3, objects: 21 };

    fn layouts(boundary: &str, grass: &str, object: &str, entities: &str) -> LevelLayouts {
        LevelLayouts {
            boundary: LayoutGrid::parse(boundary),
            grass: LayoutGrid::parse(grass),
            object: LayoutGrid::parse(object),
            entities: LayoutGrid::parse(entities),
        }
    }

    fn plan(layouts: &LevelLayouts) -> Result<LevelPlan, LevelError> {
        plan_level(layouts, COUNTS, 64.0, &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn parse_trims_cells_and_skips_blank_lines() {
        let grid = LayoutGrid::parse("-1, 3 ,-1\n\n395,-1,-1\n");
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.rows[0][1], "3");
        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(occupied, vec![(0, 1, "3"), (1, 0, "395")]);
    }

    #[test]
    fn boundary_cells_become_obstacle_placements() {
        let level = layouts(
            "395,395,395\n395,-1,395\n395,395,395",
            "-1,-1,-1\n-1,-1,-1\n-1,-1,-1",
            "-1,-1,-1\n-1,-1,-1\n-1,-1,-1",
            "-1,-1,-1\n-1,394,-1\n-1,-1,-1",
        );
        let plan = plan(&level).expect("valid level");

        assert_eq!(plan.count(|k| *k == PlacementKind::Boundary), 8);
        assert_eq!(plan.player_position(), Some(Vec2::new(64.0, 64.0)));
    }

    #[test]
    fn object_graphic_matches_layout_code() {
        let level = layouts(
            "-1,-1\n-1,-1",
            "-1,-1\n-1,-1",
            "7,-1\n-1,20",
            "-1,-1\n394,-1",
        );
        let plan = plan(&level).expect("valid level");

        let objects: Vec<_> = plan
            .placements
            .iter()
            .filter_map(|p| match p.kind {
                PlacementKind::Object { graphic } => Some((p.position, graphic)),
                _ => None,
            })
            .collect();
        assert_eq!(objects, vec![(Vec2::ZERO, 7), (Vec2::new(64.0, 64.0), 20)]);
    }

    #[test]
    fn layers_are_processed_in_order() {
        let level = layouts("1,-1", "-1,1", "-1,2", "394,-1");
        let plan = plan(&level).expect("valid level");

        let kinds: Vec<_> = plan
            .placements
            .iter()
            .map(|p| std::mem::discriminant(&p.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                std::mem::discriminant(&PlacementKind::Boundary),
                std::mem::discriminant(&PlacementKind::Grass { variant: 0 }),
                std::mem::discriminant(&PlacementKind::Object { graphic: 0 }),
                std::mem::discriminant(&PlacementKind::Player),
            ]
        );
    }

    #[test]
    fn grass_variants_stay_in_range() {
        let level = layouts(
            "-1,-1,-1,-1",
            "1,1,1,1",
            "-1,-1,-1,-1",
            "394,-1,-1,-1",
        );
        let plan = plan(&level).expect("valid level");

        for placement in &plan.placements {
            if let PlacementKind::Grass { variant } = placement.kind {
                assert!(variant < COUNTS.grass);
            }
        }
        assert_eq!(plan.count(|k| matches!(k, PlacementKind::Grass { .. })), 4);
    }

    #[test]
    fn unknown_entity_codes_spawn_squids() {
        let level = layouts(
            "-1,-1,-1,-1,-1",
            "-1,-1,-1,-1,-1",
            "-1,-1,-1,-1,-1",
            "390,391,392,393,394",
        );
        let plan = plan(&level).expect("valid level");

        let species: Vec<_> = plan
            .placements
            .iter()
            .filter_map(|p| match p.kind {
                PlacementKind::Enemy(species) => Some(species),
                _ => None,
            })
            .collect();
        assert_eq!(
            species,
            vec![Species::Bamboo, Species::Spirit, Species::Raccoon, Species::Squid]
        );
    }

    #[test]
    fn missing_or_duplicate_player_spawn_is_rejected() {
        let none = layouts("-1", "-1", "-1", "390");
        assert!(matches!(plan(&none), Err(LevelError::PlayerSpawnCount(0))));

        let two = layouts("-1,-1", "-1,-1", "-1,-1", "394,394");
        assert!(matches!(plan(&two), Err(LevelError::PlayerSpawnCount(2))));
    }

    #[test]
    fn mismatched_layers_are_rejected() {
        let level = layouts("-1,-1\n-1,-1", "-1,-1", "-1,-1\n-1,-1", "394,-1\n-1,-1");
        match plan(&level) {
            Err(LevelError::GridMismatch {
                layer,
                expected_height,
                actual_height,
                ..
            }) => {
                assert_eq!(layer, LayoutLayer::Grass);
                assert_eq!(expected_height, 2);
                assert_eq!(actual_height, 1);
            }
            other => panic!("expected grid mismatch, got {other:?}"),
        }
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let level = layouts("1,1,1\n1,1,1", "-1,-1,-1\n-1", "-1,-1,-1\n-1,-1,-1", "394,-1,-1\n-1,-1,-1");
        assert!(matches!(
            plan(&level),
            Err(LevelError::RaggedRow {
                layer: LayoutLayer::Grass,
                row: 1,
                expected: 3,
                actual: 1,
            })
        ));

        let ragged_boundary = layouts("1,1\n1", "-1,-1\n-1,-1", "-1,-1\n-1,-1", "394,-1\n-1,-1");
        assert!(matches!(
            plan(&ragged_boundary),
            Err(LevelError::RaggedRow {
                layer: LayoutLayer::Boundary,
                row: 1,
                ..
            })
        ));
    }

    #[test]
    fn out_of_range_object_code_is_rejected() {
        let level = layouts("-1", "-1", "21", "394");
        assert!(matches!(
            plan(&level),
            Err(LevelError::GraphicOutOfRange { count: 21, .. })
        ));

        let not_a_number = layouts("-1", "-1", "tree", "394");
        assert!(matches!(
            plan(&not_a_number),
            Err(LevelError::GraphicOutOfRange { .. })
        ));
    }

    #[test]
    fn grass_without_graphics_is_rejected() {
        let level = layouts("-1", "5", "-1", "394");
        let result = plan_level(
            &level,
            GraphicsCounts { grass: 0, objects: 1 },
            64.0,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(LevelError::MissingGraphics("grass"))));
    }
}
