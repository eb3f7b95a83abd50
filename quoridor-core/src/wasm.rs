//! WASM bindings for quoridor-core
//!
//! Provides a JavaScript-friendly API for the rules engine. Players are the
//! numbers 1 and 2, orientations the strings "v" and "h".

use wasm_bindgen::prelude::*;

use crate::{Action, Coord, Game, Orientation, Player, Rules};

/// WASM-friendly wrapper around Game
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

fn player_from_js(player: u8) -> Option<Player> {
    Player::from_bits(player)
}

fn orientation_from_js(orientation: &str) -> Option<Orientation> {
    match orientation {
        "v" | "V" | "vertical" => Some(Orientation::Vertical),
        "h" | "H" | "horizontal" => Some(Orientation::Horizontal),
        _ => None,
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a game under the default rules
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: Game::new() }
    }

    /// Start a game with strict jumps and the path check enabled
    #[wasm_bindgen(js_name = standard)]
    pub fn standard() -> WasmGame {
        WasmGame { inner: Game::with_rules(Rules::standard()) }
    }

    /// Player to move (1 or 2)
    pub fn turn(&self) -> u8 {
        self.inner.turn() as u8
    }

    /// Winner: 0 (none), 1 or 2
    pub fn winner(&self) -> u8 {
        self.inner.winner().map_or(0, |p| p as u8)
    }

    /// Pawn position as [x, y]
    pub fn position(&self, player: u8) -> Vec<i32> {
        match player_from_js(player) {
            Some(p) => {
                let c = self.inner.position(p);
                vec![c.x, c.y]
            }
            None => vec![],
        }
    }

    #[wasm_bindgen(js_name = fencesLeft)]
    pub fn fences_left(&self, player: u8) -> u8 {
        player_from_js(player).map_or(0, |p| self.inner.fences_left(p))
    }

    /// Vertical fence anchors as [{x, y}, ...]
    #[wasm_bindgen(js_name = verticalFences)]
    pub fn vertical_fences(&self) -> JsValue {
        to_js(&self.inner.vertical_fences())
    }

    /// Horizontal fence anchors as [{x, y}, ...]
    #[wasm_bindgen(js_name = horizontalFences)]
    pub fn horizontal_fences(&self) -> JsValue {
        to_js(&self.inner.horizontal_fences())
    }

    /// Open neighbors of a cell as [{x, y}, ...]. Null for off-board cells.
    pub fn neighbors(&self, x: i32, y: i32) -> JsValue {
        match self.inner.cell(Coord::new(x, y)) {
            Ok(cell) => to_js(&cell.neighbors()),
            Err(_) => JsValue::NULL,
        }
    }

    /// Destinations for the side to move as [{x, y}, ...]
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> JsValue {
        to_js(&self.inner.legal_pawn_moves())
    }

    /// Move a pawn. Returns true if successful.
    /// Missing coordinates are rejected like off-board ones.
    #[wasm_bindgen(js_name = movePawn)]
    pub fn move_pawn(&mut self, player: u8, x: Option<i32>, y: Option<i32>) -> bool {
        let (Some(player), Some(x), Some(y)) = (player_from_js(player), x, y) else {
            return false;
        };
        self.inner.move_pawn(player, Coord::new(x, y))
    }

    /// Place a fence. Returns true if successful.
    #[wasm_bindgen(js_name = placeFence)]
    pub fn place_fence(&mut self, player: u8, orientation: &str, x: Option<i32>, y: Option<i32>) -> bool {
        let (Some(player), Some(orientation), Some(x), Some(y)) =
            (player_from_js(player), orientation_from_js(orientation), x, y)
        else {
            return false;
        };
        self.inner.place_fence(player, orientation, Coord::new(x, y))
    }

    /// Play one action in notation, e.g. "(4,1)" or "V(3,3)", for the side to move.
    /// Returns an error message, or undefined on success.
    pub fn play(&mut self, notation: &str) -> Option<String> {
        let action: Action = match notation.parse() {
            Ok(a) => a,
            Err(e) => return Some(e.to_string()),
        };
        let player = self.inner.turn();
        self.inner.apply(player, action).err().map(|e| e.to_string())
    }

    /// Clone the game
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_game(&self) -> WasmGame {
        WasmGame { inner: self.inner.clone() }
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
