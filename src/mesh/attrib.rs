//! Per-edge attributes and material signatures.
//!
//! Edges carry the attribute bundle hosts typically store in per-edge layers:
//! subdivision crease, bevel weight, shading smoothness, UV seam and freestyle
//! line marks. Faces carry a material index; the set of distinct material
//! indices among an element's adjacent faces is its [`MaterialSignature`], the
//! comparison key for all border/selection logic in this crate.

use std::collections::BTreeSet;

/// Per-edge attribute bundle.
///
/// A default-constructed bundle is "clean": no crease, no bevel weight,
/// smooth shading, no seam, no freestyle mark. Clean edges are the only
/// candidates the dissolve filter keeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAttributes {
    /// Subdivision crease weight, non-negative.
    pub crease: f64,

    /// Bevel modifier weight, non-negative.
    pub bevel_weight: f64,

    /// Smooth shading flag; `false` marks the edge sharp.
    pub smooth: bool,

    /// UV seam flag.
    pub seam: bool,

    /// Freestyle line rendering mark.
    pub freestyle_mark: bool,
}

impl Default for EdgeAttributes {
    fn default() -> Self {
        Self {
            crease: 0.0,
            bevel_weight: 0.0,
            smooth: true,
            seam: false,
            freestyle_mark: false,
        }
    }
}

impl EdgeAttributes {
    /// Check whether every attribute is at its neutral value.
    ///
    /// Clean edges carry no information that a dissolve could destroy.
    pub fn is_clean(&self) -> bool {
        self.crease <= 0.0
            && self.bevel_weight <= 0.0
            && self.smooth
            && !self.seam
            && !self.freestyle_mark
    }

    /// Combine the attributes of two edges being merged into one.
    ///
    /// Weights take the maximum, smoothness survives only if both edges were
    /// smooth, and marks are kept if either edge carried them. Merging never
    /// weakens boundary information.
    pub fn merged_with(&self, other: &EdgeAttributes) -> EdgeAttributes {
        EdgeAttributes {
            crease: self.crease.max(other.crease),
            bevel_weight: self.bevel_weight.max(other.bevel_weight),
            smooth: self.smooth && other.smooth,
            seam: self.seam || other.seam,
            freestyle_mark: self.freestyle_mark || other.freestyle_mark,
        }
    }
}

/// The set of distinct material indices among an element's adjacent faces.
///
/// A signature of size 1 means "interior to one material region", size ≥ 2
/// means "on a material boundary", size 0 means "no adjacent faces" (a wire
/// edge or an isolated vertex). Signatures compare as sets: the enumeration
/// order of the adjacent faces never matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MaterialSignature {
    materials: BTreeSet<u32>,
}

impl MaterialSignature {
    /// Create an empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material index to the signature.
    pub fn insert(&mut self, material: u32) {
        self.materials.insert(material);
    }

    /// Number of distinct materials in the signature.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Check whether the signature is empty (no adjacent faces).
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Check whether the signature contains a material index.
    pub fn contains(&self, material: u32) -> bool {
        self.materials.contains(&material)
    }

    /// Check whether every material in this signature appears in `other`.
    pub fn is_subset_of(&self, other: &MaterialSignature) -> bool {
        self.materials.is_subset(&other.materials)
    }

    /// Absorb all materials of `other` into this signature.
    pub fn merge(&mut self, other: &MaterialSignature) {
        self.materials.extend(other.materials.iter().copied());
    }

    /// Iterate over the material indices in ascending order.
    pub fn materials(&self) -> impl Iterator<Item = u32> + '_ {
        self.materials.iter().copied()
    }
}

impl FromIterator<u32> for MaterialSignature {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self {
            materials: iter.into_iter().collect(),
        }
    }
}
