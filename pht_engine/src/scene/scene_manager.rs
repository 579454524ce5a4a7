//! Central scene manager for the engine.
//!
//! Owns every scene and hands them the shared renderer collaborator.
//! Scenes are keyed by the hash of their name.

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::renderer::Renderer;
use super::scene::{Scene, SceneDesc};
use super::scene_object::name_id;

pub struct SceneManager {
    renderer: Arc<Mutex<dyn Renderer>>,
    scenes: FxHashMap<u32, Scene>,
}

impl SceneManager {
    /// Create an empty scene manager drawing resources from `renderer`
    pub fn new(renderer: Arc<Mutex<dyn Renderer>>) -> Self {
        Self {
            renderer,
            scenes: FxHashMap::default(),
        }
    }

    pub fn renderer(&self) -> &Arc<Mutex<dyn Renderer>> {
        &self.renderer
    }

    /// Create a scene. Fails if a scene with the same name exists.
    pub fn create_scene(&mut self, desc: SceneDesc) -> Result<&mut Scene> {
        let id = name_id(&desc.name);
        if self.scenes.contains_key(&id) {
            let message = format!("Scene '{}' already exists", desc.name);
            crate::engine_error!("pht::SceneManager", "{}", message);
            return Err(Error::InvalidResource(message));
        }

        crate::engine_info!("pht::SceneManager", "Scene '{}' created", desc.name);
        let scene = Scene::new(self.renderer.clone(), desc);
        Ok(self.scenes.entry(id).or_insert(scene))
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(&name_id(name))
    }

    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(&name_id(name))
    }

    /// Remove a scene, handing it back to the caller
    pub fn remove_scene(&mut self, name: &str) -> Option<Scene> {
        let scene = self.scenes.remove(&name_id(name))?;
        crate::engine_info!("pht::SceneManager", "Scene '{}' removed", name);
        Some(scene)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Names of all scenes, sorted
    pub fn scene_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scenes.values().map(Scene::name).collect();
        names.sort_unstable();
        names
    }

    /// Drop every scene
    pub fn clear(&mut self) {
        if !self.scenes.is_empty() {
            crate::engine_info!("pht::SceneManager", "Clearing {} scenes", self.scenes.len());
        }
        self.scenes.clear();
    }
}

#[cfg(test)]
#[path = "scene_manager_tests.rs"]
mod tests;
