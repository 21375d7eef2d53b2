//! Sprite assets
//!
//! Every sprite is loaded on its own and may never arrive. The table only
//! records what did arrive; the presenter asks for a sprite each frame and
//! skips drawing when it is absent.

use std::collections::HashMap;

/// Every image the game knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    /// Target face (play)
    Target,
    /// Player face (play)
    Player,
    /// Target standing pose (ending)
    TargetStanding,
    /// Player standing pose (ending)
    PlayerStanding,
    Arrow,
    Heart,
    Bow,
    /// Start-screen thread decoration
    Thread,
}

impl SpriteId {
    pub const ALL: [SpriteId; 8] = [
        SpriteId::Target,
        SpriteId::Player,
        SpriteId::TargetStanding,
        SpriteId::PlayerStanding,
        SpriteId::Arrow,
        SpriteId::Heart,
        SpriteId::Bow,
        SpriteId::Thread,
    ];

    /// Path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            SpriteId::Target => "assets/rami.png",
            SpriteId::Player => "assets/varun.png",
            SpriteId::TargetStanding => "assets/rstand.png",
            SpriteId::PlayerStanding => "assets/vstand.png",
            SpriteId::Arrow => "assets/arrow.png",
            SpriteId::Heart => "assets/heartattack.png",
            SpriteId::Bow => "assets/bow.png",
            SpriteId::Thread => "assets/thread.png",
        }
    }
}

/// Loaded image handles keyed by sprite; anything missing is simply absent
#[derive(Debug)]
pub struct AssetTable<T> {
    slots: HashMap<SpriteId, T>,
}

impl<T> Default for AssetTable<T> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<T> AssetTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sprite that finished loading
    pub fn insert(&mut self, id: SpriteId, image: T) {
        self.slots.insert(id, image);
    }

    pub fn get(&self, id: SpriteId) -> Option<&T> {
        self.slots.get(&id)
    }

    /// Sprites that have not (yet) arrived
    pub fn missing(&self) -> Vec<SpriteId> {
        SpriteId::ALL
            .into_iter()
            .filter(|id| !self.slots.contains_key(id))
            .collect()
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlImageElement;

    use super::{AssetTable, SpriteId};

    /// Shared table the image callbacks fill in
    pub type SharedAssets = Rc<RefCell<AssetTable<HtmlImageElement>>>;

    /// Kick off every image load. Returns immediately; each image lands in the
    /// table (or logs a warning) on its own schedule.
    pub fn preload(assets: &SharedAssets) {
        for id in SpriteId::ALL {
            if let Err(e) = load_one(assets, id) {
                log::warn!("could not request {}: {:?}", id.path(), e);
            }
        }
    }

    fn load_one(assets: &SharedAssets, id: SpriteId) -> Result<(), JsValue> {
        let img = HtmlImageElement::new()?;

        let onload = {
            let assets = assets.clone();
            let img = img.clone();
            Closure::<dyn FnMut()>::new(move || {
                assets.borrow_mut().insert(id, img.clone());
                log::debug!("loaded {}", id.path());
            })
        };
        let onerror = Closure::<dyn FnMut()>::new(move || {
            log::warn!("missing asset {}", id.path());
        });

        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        img.set_src(id.path());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{SharedAssets, preload};
