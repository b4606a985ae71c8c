use crate::layers::base::{Layer, LayerKind};
use fxhash::FxHashMap;

/// Manages the attached layer set, keeping a stable z-ordered render order
pub struct LayerManager {
    /// All layers indexed by ID
    layers: FxHashMap<String, Box<dyn Layer>>,
    /// Ordered list of layer IDs for rendering (sorted by z-index)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: FxHashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer, keeping render order sorted by z-index. Layer ids
    /// are unique; re-adding an id is a misuse.
    pub fn add_layer(&mut self, layer: Box<dyn Layer>) -> crate::Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(crate::MapError::Layer(format!(
                "layer '{layer_id}' already attached"
            )));
        }

        let z_index = layer.z_index();
        self.layers.insert(layer_id.clone(), layer);

        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Removes a layer by ID
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn Layer>> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn Layer> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn Layer> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Counts layers of a given kind
    pub fn count_of(&self, kind: LayerKind) -> usize {
        self.layers.values().filter(|l| l.kind() == kind).count()
    }

    /// Removes every layer
    pub fn clear(&mut self) {
        self.layers.clear();
        self.render_order.clear();
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
