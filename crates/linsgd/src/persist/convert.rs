//! Conversion between runtime types and schema types.
//!
//! Saving can fail only on non-finite numbers, which JSON cannot carry.
//! Loading re-checks every structural invariant of [`SgdModel`] and reports
//! violations as [`PersistError::Invalid`].

use std::collections::BTreeSet;

use ndarray::Array1;

use super::schema::{
    FeaturesSchema, ModelMetaSchema, OutputTransformSchema, SgdModelSchema, TaskKindSchema,
    WeightsSchema, SCHEMA_VERSION,
};
use super::PersistError;
use crate::data::FeatureBounds;
use crate::hashing::{TableSize, TextFeaturizer};
use crate::model::{FeatureSpace, ModelMeta, OutputTransform, SgdModel, TaskKind};
use crate::repr::LinearModel;

// =============================================================================
// Enum conversions
// =============================================================================

impl From<TaskKind> for TaskKindSchema {
    fn from(task: TaskKind) -> Self {
        match task {
            TaskKind::Regression => Self::Regression,
            TaskKind::BinaryClassification => Self::BinaryClassification,
        }
    }
}

impl From<TaskKindSchema> for TaskKind {
    fn from(task: TaskKindSchema) -> Self {
        match task {
            TaskKindSchema::Regression => Self::Regression,
            TaskKindSchema::BinaryClassification => Self::BinaryClassification,
        }
    }
}

impl From<OutputTransform> for OutputTransformSchema {
    fn from(transform: OutputTransform) -> Self {
        match transform {
            OutputTransform::Identity => Self::Identity,
            OutputTransform::Sigmoid => Self::Sigmoid,
        }
    }
}

impl From<OutputTransformSchema> for OutputTransform {
    fn from(transform: OutputTransformSchema) -> Self {
        match transform {
            OutputTransformSchema::Identity => Self::Identity,
            OutputTransformSchema::Sigmoid => Self::Sigmoid,
        }
    }
}

impl From<&ModelMeta> for ModelMetaSchema {
    fn from(meta: &ModelMeta) -> Self {
        Self {
            task: meta.task.into(),
            transform: meta.transform.into(),
            n_features: meta.n_features,
        }
    }
}

// =============================================================================
// SgdModel -> schema
// =============================================================================

fn check_finite<'a>(
    field: &'static str,
    values: impl IntoIterator<Item = &'a f64>,
) -> Result<(), PersistError> {
    match values.into_iter().position(|v| !v.is_finite()) {
        Some(index) => Err(PersistError::NonFinite { field, index }),
        None => Ok(()),
    }
}

impl TryFrom<&SgdModel> for SgdModelSchema {
    type Error = PersistError;

    fn try_from(model: &SgdModel) -> Result<Self, Self::Error> {
        let linear = model.linear();
        check_finite("bias", [linear.bias()].iter())?;
        check_finite("weights", linear.weights().iter())?;

        let (weights, features) = match model.features() {
            FeatureSpace::Dense { bounds } => {
                check_finite("min", bounds.min().iter())?;
                check_finite("max", bounds.max().iter())?;
                (
                    WeightsSchema::Dense {
                        values: linear.weights().to_vec(),
                    },
                    FeaturesSchema::Dense {
                        min: bounds.min().to_vec(),
                        max: bounds.max().to_vec(),
                    },
                )
            }
            FeatureSpace::Hashed { featurizer } => {
                let entries = linear
                    .weights()
                    .iter()
                    .enumerate()
                    .filter(|(_, w)| w.to_bits() != 0)
                    .map(|(j, &w)| (j as u32, w))
                    .collect();
                (
                    WeightsSchema::Sparse {
                        len: linear.n_weights(),
                        entries,
                    },
                    FeaturesSchema::Hashed {
                        ngram_order: featurizer.ngram_order(),
                        table_bits: featurizer.table_size().bits(),
                        strip_diacritics: featurizer.strips_diacritics(),
                    },
                )
            }
        };

        Ok(Self {
            version: SCHEMA_VERSION,
            meta: model.meta().into(),
            bias: linear.bias(),
            weights,
            features,
        })
    }
}

// =============================================================================
// schema -> SgdModel
// =============================================================================

fn invalid(message: impl Into<String>) -> PersistError {
    PersistError::Invalid(message.into())
}

fn dense_weights(weights: WeightsSchema, n_features: usize) -> Result<Array1<f64>, PersistError> {
    match weights {
        WeightsSchema::Dense { values } if values.len() == n_features => Ok(Array1::from(values)),
        WeightsSchema::Dense { values } => Err(invalid(format!(
            "dense weights have {} values, expected {n_features}",
            values.len()
        ))),
        WeightsSchema::Sparse { .. } => Err(invalid("dense features require dense weights")),
    }
}

fn sparse_weights(weights: WeightsSchema, table_size: TableSize) -> Result<Array1<f64>, PersistError> {
    let (len, entries) = match weights {
        WeightsSchema::Sparse { len, entries } => (len, entries),
        WeightsSchema::Dense { .. } => return Err(invalid("hashed features require sparse weights")),
    };
    if len != table_size.len() {
        return Err(invalid(format!(
            "sparse weights have len {len}, table size is {}",
            table_size.len()
        )));
    }

    let mut values = Array1::zeros(len);
    let mut seen = BTreeSet::new();
    for (index, value) in entries {
        if index as usize >= len {
            return Err(invalid(format!("weight index {index} out of range for len {len}")));
        }
        if !seen.insert(index) {
            return Err(invalid(format!("duplicate weight index {index}")));
        }
        values[index as usize] = value;
    }
    Ok(values)
}

impl TryFrom<SgdModelSchema> for SgdModel {
    type Error = PersistError;

    fn try_from(schema: SgdModelSchema) -> Result<Self, Self::Error> {
        if schema.version != SCHEMA_VERSION {
            return Err(invalid(format!(
                "unsupported schema version {}, expected {SCHEMA_VERSION}",
                schema.version
            )));
        }

        let task = TaskKind::from(schema.meta.task);
        let transform = OutputTransform::from(schema.meta.transform);
        if transform != task.output_transform() {
            return Err(invalid(format!(
                "transform {:?} does not match task {task}",
                schema.meta.transform
            )));
        }
        let n_features = schema.meta.n_features;

        let (weights, features) = match schema.features {
            FeaturesSchema::Dense { min, max } => {
                let bounds = FeatureBounds::new(Array1::from(min), Array1::from(max))
                    .map_err(|e| invalid(e.to_string()))?;
                if bounds.n_features() != n_features {
                    return Err(invalid(format!(
                        "bounds cover {} features, meta says {n_features}",
                        bounds.n_features()
                    )));
                }
                (
                    dense_weights(schema.weights, n_features)?,
                    FeatureSpace::Dense { bounds },
                )
            }
            FeaturesSchema::Hashed {
                ngram_order,
                table_bits,
                strip_diacritics,
            } => {
                let table_size = TableSize::from_bits(table_bits).map_err(|e| invalid(e.to_string()))?;
                if table_size.len() != n_features {
                    return Err(invalid(format!(
                        "table size {} does not match meta n_features {n_features}",
                        table_size.len()
                    )));
                }
                (
                    sparse_weights(schema.weights, table_size)?,
                    FeatureSpace::Hashed {
                        featurizer: TextFeaturizer::new(table_size, ngram_order, strip_diacritics),
                    },
                )
            }
        };

        if features.kind().task() != task {
            return Err(invalid(format!(
                "a {task} model cannot use {} features",
                features.kind()
            )));
        }

        let meta = ModelMeta {
            task,
            transform,
            n_features,
        };
        Ok(SgdModel::from_parts(
            LinearModel::new(schema.bias, weights),
            meta,
            features,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn dense_schema() -> SgdModelSchema {
        SgdModelSchema {
            version: SCHEMA_VERSION,
            meta: ModelMetaSchema {
                task: TaskKindSchema::Regression,
                transform: OutputTransformSchema::Identity,
                n_features: 2,
            },
            bias: 0.5,
            weights: WeightsSchema::Dense {
                values: vec![1.0, -1.0],
            },
            features: FeaturesSchema::Dense {
                min: vec![0.0, 0.0],
                max: vec![1.0, 2.0],
            },
        }
    }

    fn hashed_schema() -> SgdModelSchema {
        SgdModelSchema {
            version: SCHEMA_VERSION,
            meta: ModelMetaSchema {
                task: TaskKindSchema::BinaryClassification,
                transform: OutputTransformSchema::Sigmoid,
                n_features: 8,
            },
            bias: -0.25,
            weights: WeightsSchema::Sparse {
                len: 8,
                entries: vec![(3, 0.75)],
            },
            features: FeaturesSchema::Hashed {
                ngram_order: 2,
                table_bits: 3,
                strip_diacritics: true,
            },
        }
    }

    #[test]
    fn dense_schema_to_model() {
        let model = SgdModel::try_from(dense_schema()).unwrap();
        assert_eq!(model.linear().weights(), array![1.0, -1.0]);
        assert_eq!(model.bounds().unwrap().max(), array![1.0, 2.0]);
        assert_eq!(model.task(), TaskKind::Regression);
    }

    #[test]
    fn hashed_schema_to_model_and_back() {
        let schema = hashed_schema();
        let model = SgdModel::try_from(schema.clone()).unwrap();
        assert_eq!(model.linear().weight(3), 0.75);
        assert_eq!(model.linear().n_nonzero(), 1);
        let featurizer = model.featurizer().unwrap();
        assert_eq!(featurizer.ngram_order(), 2);
        assert!(featurizer.strips_diacritics());

        assert_eq!(SgdModelSchema::try_from(&model).unwrap(), schema);
    }

    #[test]
    fn negative_zero_is_kept_in_sparse_entries() {
        let mut schema = hashed_schema();
        schema.weights = WeightsSchema::Sparse {
            len: 8,
            entries: vec![(0, -0.0)],
        };
        let model = SgdModel::try_from(schema.clone()).unwrap();
        assert_eq!(SgdModelSchema::try_from(&model).unwrap(), schema);
    }

    #[test]
    fn rejects_bad_version() {
        let mut schema = dense_schema();
        schema.version = 2;
        assert!(matches!(SgdModel::try_from(schema), Err(PersistError::Invalid(_))));
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut schema = dense_schema();
        schema.weights = WeightsSchema::Dense { values: vec![1.0] };
        assert!(matches!(SgdModel::try_from(schema), Err(PersistError::Invalid(_))));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut schema = dense_schema();
        schema.features = FeaturesSchema::Dense {
            min: vec![0.0, 3.0],
            max: vec![1.0, 2.0],
        };
        assert!(matches!(SgdModel::try_from(schema), Err(PersistError::Invalid(_))));
    }

    #[test]
    fn rejects_out_of_range_and_duplicate_indices() {
        let mut schema = hashed_schema();
        schema.weights = WeightsSchema::Sparse {
            len: 8,
            entries: vec![(8, 1.0)],
        };
        assert!(matches!(SgdModel::try_from(schema), Err(PersistError::Invalid(_))));

        let mut schema = hashed_schema();
        schema.weights = WeightsSchema::Sparse {
            len: 8,
            entries: vec![(2, 1.0), (2, 2.0)],
        };
        assert!(matches!(SgdModel::try_from(schema), Err(PersistError::Invalid(_))));
    }

    #[test]
    fn rejects_table_size_mismatch() {
        let mut schema = hashed_schema();
        schema.features = FeaturesSchema::Hashed {
            ngram_order: 0,
            table_bits: 4,
            strip_diacritics: false,
        };
        assert!(matches!(SgdModel::try_from(schema), Err(PersistError::Invalid(_))));

        let mut schema = hashed_schema();
        schema.features = FeaturesSchema::Hashed {
            ngram_order: 0,
            table_bits: 40,
            strip_diacritics: false,
        };
        assert!(matches!(SgdModel::try_from(schema), Err(PersistError::Invalid(_))));
    }

    #[test]
    fn rejects_mixed_weight_and_feature_kinds() {
        let mut schema = hashed_schema();
        schema.weights = WeightsSchema::Dense {
            values: vec![0.0; 8],
        };
        assert!(matches!(SgdModel::try_from(schema), Err(PersistError::Invalid(_))));
    }

    #[test]
    fn rejects_transform_task_mismatch() {
        let mut schema = dense_schema();
        schema.meta.transform = OutputTransformSchema::Sigmoid;
        assert!(matches!(SgdModel::try_from(schema), Err(PersistError::Invalid(_))));
    }

    #[test]
    fn rejects_task_feature_kind_mismatch() {
        let mut schema = hashed_schema();
        schema.meta.task = TaskKindSchema::Regression;
        schema.meta.transform = OutputTransformSchema::Identity;
        assert!(matches!(SgdModel::try_from(schema), Err(PersistError::Invalid(_))));

        let mut schema = dense_schema();
        schema.meta.task = TaskKindSchema::BinaryClassification;
        schema.meta.transform = OutputTransformSchema::Sigmoid;
        assert!(matches!(SgdModel::try_from(schema), Err(PersistError::Invalid(_))));
    }

    #[test]
    fn non_finite_weight_fails_to_save() {
        let model = SgdModel::try_from(dense_schema()).unwrap();
        let mut linear = model.linear().clone();
        linear.weights_mut()[1] = f64::NAN;
        let broken = SgdModel::from_parts(linear, *model.meta(), model.features().clone());
        assert!(matches!(
            SgdModelSchema::try_from(&broken),
            Err(PersistError::NonFinite {
                field: "weights",
                index: 1
            })
        ));
    }
}
