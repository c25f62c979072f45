use serde::Serialize;

/// Layer index to polygon indices.
///
/// Every layer owns its own list; pushing into one layer never touches
/// another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LayerMap {
    layers: Vec<Vec<usize>>,
}

impl LayerMap {
    /// Creates a map with `count` empty layers.
    #[must_use]
    pub fn with_layers(count: usize) -> Self {
        Self {
            layers: (0..count).map(|_| Vec::new()).collect(),
        }
    }

    /// Records `polygon` in `layer`, growing the map if needed.
    pub fn push(&mut self, layer: usize, polygon: usize) {
        if layer >= self.layers.len() {
            self.layers.resize_with(layer + 1, Vec::new);
        }
        self.layers[layer].push(polygon);
    }

    /// Polygon indices of `layer`; empty for unknown layers.
    #[must_use]
    pub fn get(&self, layer: usize) -> &[usize] {
        self.layers.get(layer).map_or(&[], Vec::as_slice)
    }

    /// Number of layers, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterates `(layer, polygon indices)` in layer order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.layers.iter().map(Vec::as_slice).enumerate()
    }

    /// Every polygon index in layer order.
    pub fn polygon_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.layers.iter().flatten().copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn layers_do_not_share_storage() {
        let mut map = LayerMap::with_layers(3);
        map.push(0, 7);
        map.push(1, 9);
        map.push(1, 11);
        assert_eq!(map.get(0), &[7]);
        assert_eq!(map.get(1), &[9, 11]);
        assert!(map.get(2).is_empty());
    }

    #[test]
    fn push_beyond_len_grows_map() {
        let mut map = LayerMap::with_layers(1);
        map.push(2, 4);
        assert_eq!(map.len(), 3);
        assert!(map.get(1).is_empty());
        assert_eq!(map.get(2), &[4]);
        assert!(map.get(10).is_empty());
    }

    #[test]
    fn iterates_in_layer_order() {
        let mut map = LayerMap::with_layers(2);
        map.push(1, 3);
        map.push(0, 1);
        map.push(0, 2);
        let flat: Vec<usize> = map.polygon_indices().collect();
        assert_eq!(flat, vec![1, 2, 3]);
        let sizes: Vec<usize> = map.iter().map(|(_, p)| p.len()).collect();
        assert_eq!(sizes, vec![2, 1]);
    }

    #[test]
    fn serializes_as_nested_lists() {
        let mut map = LayerMap::with_layers(2);
        map.push(1, 5);
        assert_eq!(serde_json::to_string(&map).unwrap(), "[[],[5]]");
    }
}
