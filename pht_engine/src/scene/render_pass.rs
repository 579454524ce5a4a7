/// Render pass descriptors and render queue policies.

/// Order in which a render queue sorts its entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderOrder {
    /// Depth-writing entries batched by sort key (descending), ties drawn
    /// front to back; blended entries back to front.
    #[default]
    StateOptimized,
    /// Depth-writing entries front to back for early depth rejection, sort
    /// key as tie-break; blended entries back to front.
    PixelOptimized,
    /// One partition, everything back to front.
    BackToFront,
}

/// How a render queue turns a world position into a sort distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceFunction {
    /// Negated Z of the position in camera space
    #[default]
    CameraSpaceZ,
    /// World-space Z
    WorldZ,
    /// Negated world-space Z
    NegatedWorldZ,
}

/// One logical rendering stage (main scene, HUD, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPassDesc {
    /// Debug name
    pub name: String,
    /// Layers drawn by this pass
    pub layer_mask: u32,
    /// Sorting policy of the pass
    pub render_order: RenderOrder,
}

/// Number of distinct layers a mask can hold
pub const MAX_LAYERS: u8 = u32::BITS as u8;

/// Mask bit of layer `layer_index`, None past the last layer
pub fn layer_bit(layer_index: u8) -> Option<u32> {
    1u32.checked_shl(layer_index as u32)
}

impl RenderPassDesc {
    /// Pass drawing the single layer `layer_index`.
    ///
    /// An out-of-range index yields a pass that draws nothing.
    pub fn for_layer(name: &str, layer_index: u8, render_order: RenderOrder) -> Self {
        let layer_mask = layer_bit(layer_index).unwrap_or_else(|| {
            crate::engine_warn!("pht::RenderPass",
                "Pass '{}': layer {} out of range (max {}), pass draws nothing", name, layer_index, MAX_LAYERS - 1);
            0
        });
        Self {
            name: name.to_string(),
            layer_mask,
            render_order,
        }
    }

    /// Whether the pass draws layer `layer_index`
    pub fn draws_layer(&self, layer_index: u8) -> bool {
        layer_bit(layer_index).is_some_and(|bit| self.layer_mask & bit != 0)
    }
}

#[cfg(test)]
#[path = "render_pass_tests.rs"]
mod tests;
