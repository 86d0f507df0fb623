//! Static intervention rule table.
//!
//! Each risk feature maps to either an unconditional intervention list or a
//! thresholded rule whose qualitative bucket is computed from the feature's
//! raw value. AGE deliberately uses its own two-level risk vocabulary
//! ("high_risk" / "moderate_risk") while the clinical measures use
//! "high" / "low"; a bucket with no entry in a rule's map contributes no
//! interventions, and BMI / BP_S carry a "low" list their high-only
//! bucketing never selects. Both asymmetries match the deployed rule set
//! and are kept as-is rather than unified.

/// Bucketing strategy for a thresholded rule.
#[derive(Debug, Clone, Copy)]
pub enum Bucketing {
    /// AGE-only vocabulary: ≥ high → "high_risk", ≥ moderate → "moderate_risk".
    AgeBands { high: f64, moderate: f64 },
    /// Generic clinical measure: ≥ threshold → "high".
    HighAbove(f64),
    /// Adherence-style measure: ≤ threshold → "low".
    LowBelow(f64),
}

impl Bucketing {
    /// Qualitative bucket for a raw value, `None` when in the normal range.
    pub fn bucket(&self, value: f64) -> Option<&'static str> {
        match *self {
            Bucketing::AgeBands { high, moderate } => {
                if value >= high {
                    Some("high_risk")
                } else if value >= moderate {
                    Some("moderate_risk")
                } else {
                    None
                }
            }
            Bucketing::HighAbove(threshold) => (value >= threshold).then_some("high"),
            Bucketing::LowBelow(threshold) => (value <= threshold).then_some("low"),
        }
    }
}

/// One entry in the rule table.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// The feature's presence alone selects these interventions.
    Unconditional(&'static [&'static str]),
    /// Interventions keyed by the qualitative bucket of the raw value.
    Thresholded {
        bucketing: Bucketing,
        by_bucket: &'static [(&'static str, &'static [&'static str])],
    },
}

impl Rule {
    /// Resolve the applicable intervention list for a raw feature value.
    pub fn interventions(&self, raw_value: f64) -> &'static [&'static str] {
        match *self {
            Rule::Unconditional(list) => list,
            Rule::Thresholded {
                bucketing,
                by_bucket,
            } => {
                let Some(bucket) = bucketing.bucket(raw_value) else {
                    return &[];
                };
                by_bucket
                    .iter()
                    .find(|(name, _)| *name == bucket)
                    .map(|(_, list)| *list)
                    .unwrap_or(&[])
            }
        }
    }
}

/// Look up the rule for a feature name. Features without a rule (e.g. the
/// derived CLAIMS_FLAG / COMOR_COUNT columns) yield no interventions.
pub fn rule_for(feature: &str) -> Option<Rule> {
    let rule = match feature {
        "AGE" => Rule::Thresholded {
            bucketing: Bucketing::AgeBands {
                high: 75.0,
                moderate: 65.0,
            },
            by_bucket: &[
                (
                    "high_risk",
                    &[
                        "Schedule comprehensive geriatric assessment",
                        "Review medication for age-appropriate dosing",
                        "Implement fall prevention measures",
                    ],
                ),
                (
                    "moderate_risk",
                    &[
                        "Annual wellness visit recommended",
                        "Review preventive care schedule",
                    ],
                ),
            ],
        },

        // Chronic conditions: the flag being a top contributor is enough.
        "ALZHEIMER" => Rule::Unconditional(&[
            "Neurological consultation for cognitive assessment",
            "Implement memory support strategies",
            "Review medication interactions",
        ]),
        "HEARTFAILURE" => Rule::Unconditional(&[
            "Cardiology consultation for heart failure management",
            "Implement sodium-restricted diet",
            "Daily weight monitoring recommended",
        ]),
        "CANCER" => Rule::Unconditional(&[
            "Oncology consultation for treatment optimization",
            "Implement pain management strategies",
            "Nutrition support consultation",
        ]),
        "PULMONARY" => Rule::Unconditional(&[
            "Pulmonology consultation for respiratory optimization",
            "Implement breathing exercises",
            "Smoking cessation support if applicable",
        ]),
        "OSTEOPOROSIS" => Rule::Unconditional(&[
            "Bone density assessment and calcium supplementation",
            "Fall prevention and balance training",
            "Vitamin D supplementation review",
        ]),
        "RHEUMATOID" => Rule::Unconditional(&[
            "Rheumatology consultation for disease management",
            "Implement joint protection strategies",
            "Pain management optimization",
        ]),
        "STROKE" => Rule::Unconditional(&[
            "Neurology consultation for stroke prevention",
            "Implement blood pressure monitoring",
            "Anticoagulation therapy review",
        ]),
        "RENAL_DISEASE" => Rule::Unconditional(&[
            "Nephrology consultation for kidney function optimization",
            "Implement renal diet restrictions",
            "Medication dose adjustment for renal function",
        ]),

        // Clinical measures. BMI and BP_S keep a "low" entry that the
        // high-only bucketing never selects; the deployed rule set carries
        // it and it is reproduced verbatim.
        "BMI" => Rule::Thresholded {
            bucketing: Bucketing::HighAbove(30.0),
            by_bucket: &[
                (
                    "high",
                    &[
                        "Nutrition consultation for weight management",
                        "Implement physical activity program",
                        "Metabolic syndrome screening",
                    ],
                ),
                (
                    "low",
                    &[
                        "Nutrition consultation for weight gain",
                        "Screening for underlying conditions",
                        "Implement strength training program",
                    ],
                ),
            ],
        },
        "BP_S" => Rule::Thresholded {
            bucketing: Bucketing::HighAbove(140.0),
            by_bucket: &[
                (
                    "high",
                    &[
                        "Implement blood pressure monitoring",
                        "Cardiology consultation for hypertension management",
                        "Lifestyle modification counseling",
                    ],
                ),
                (
                    "low",
                    &[
                        "Monitor for orthostatic hypotension",
                        "Review medications for blood pressure effects",
                        "Implement gradual position changes",
                    ],
                ),
            ],
        },
        "GLUCOSE" => Rule::Thresholded {
            bucketing: Bucketing::HighAbove(126.0),
            by_bucket: &[(
                "high",
                &[
                    "Endocrinology consultation for diabetes management",
                    "Implement blood glucose monitoring",
                    "Diabetes education and lifestyle counseling",
                ],
            )],
        },
        "HbA1c" => Rule::Thresholded {
            bucketing: Bucketing::HighAbove(6.5),
            by_bucket: &[(
                "high",
                &[
                    "Diabetes management optimization",
                    "Implement glycemic control strategies",
                    "Nutrition consultation for diabetes",
                ],
            )],
        },
        "CHOLESTEROL" => Rule::Thresholded {
            bucketing: Bucketing::HighAbove(200.0),
            by_bucket: &[(
                "high",
                &[
                    "Cardiology consultation for lipid management",
                    "Implement heart-healthy diet",
                    "Exercise program for cardiovascular health",
                ],
            )],
        },

        // Utilization and cost
        "TOTAL_CLAIMS_COST" => Rule::Thresholded {
            bucketing: Bucketing::HighAbove(10_000.0),
            by_bucket: &[(
                "high",
                &[
                    "Care coordination to optimize resource utilization",
                    "Review for unnecessary healthcare services",
                    "Implement preventive care strategies",
                ],
            )],
        },
        "IN_ADM" => Rule::Thresholded {
            bucketing: Bucketing::HighAbove(2.0),
            by_bucket: &[(
                "high",
                &[
                    "Care transition planning to prevent readmissions",
                    "Post-discharge follow-up scheduling",
                    "Medication reconciliation review",
                ],
            )],
        },
        "OUT_VISITS" => Rule::Thresholded {
            bucketing: Bucketing::HighAbove(10.0),
            by_bucket: &[(
                "high",
                &[
                    "Care coordination to optimize outpatient visits",
                    "Implement telehealth options where appropriate",
                    "Review appointment scheduling efficiency",
                ],
            )],
        },
        "ED_VISITS" => Rule::Thresholded {
            bucketing: Bucketing::HighAbove(2.0),
            by_bucket: &[(
                "high",
                &[
                    "Implement urgent care alternatives",
                    "Care coordination to prevent ED visits",
                    "Review for appropriate care setting utilization",
                ],
            )],
        },
        "RX_ADH" => Rule::Thresholded {
            bucketing: Bucketing::LowBelow(0.8),
            by_bucket: &[(
                "low",
                &[
                    "Medication adherence counseling",
                    "Implement medication reminder systems",
                    "Review for medication simplification",
                ],
            )],
        },

        _ => return None,
    };
    Some(rule)
}

/// General recommendations selected by the 30-day score band. Every band
/// yields a non-empty list, so backfill always has candidates.
pub fn general_recommendations(score_30d: u8) -> &'static [&'static str] {
    if score_30d >= 80 {
        &[
            "Immediate care coordination recommended",
            "Consider intensive case management",
            "Schedule urgent follow-up appointment",
        ]
    } else if score_30d >= 60 {
        &[
            "Enhanced care monitoring recommended",
            "Schedule follow-up within 2 weeks",
            "Implement preventive care strategies",
        ]
    } else if score_30d >= 40 {
        &[
            "Regular monitoring recommended",
            "Annual wellness visit scheduling",
            "Preventive care optimization",
        ]
    } else {
        &[
            "Continue preventive care routine",
            "Annual wellness visit recommended",
            "Maintain healthy lifestyle practices",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_uses_its_own_vocabulary() {
        let rule = rule_for("AGE").unwrap();
        let high = rule.interventions(80.0);
        assert!(high.contains(&"Schedule comprehensive geriatric assessment"));
        let moderate = rule.interventions(68.0);
        assert!(moderate.contains(&"Annual wellness visit recommended"));
        assert!(rule.interventions(40.0).is_empty());
    }

    #[test]
    fn test_chronic_flags_are_unconditional() {
        let rule = rule_for("HEARTFAILURE").unwrap();
        // Value is irrelevant for unconditional rules.
        assert_eq!(rule.interventions(0.0), rule.interventions(1.0));
        assert_eq!(rule.interventions(1.0).len(), 3);
    }

    #[test]
    fn test_glucose_silent_below_threshold() {
        let rule = rule_for("GLUCOSE").unwrap();
        assert!(rule.interventions(100.0).is_empty());
        assert_eq!(rule.interventions(126.0).len(), 3);
    }

    #[test]
    fn test_bp_low_values_select_nothing() {
        // The "low" list exists in the map but the bucketing is high-only,
        // so hypotensive readings emit no interventions.
        let rule = rule_for("BP_S").unwrap();
        assert!(rule.interventions(85.0).is_empty());
        assert!(rule
            .interventions(150.0)
            .contains(&"Implement blood pressure monitoring"));
    }

    #[test]
    fn test_bmi_low_values_select_nothing() {
        let rule = rule_for("BMI").unwrap();
        assert!(rule.interventions(17.0).is_empty());
        assert_eq!(rule.interventions(32.0).len(), 3);
    }

    #[test]
    fn test_adherence_low_bucket_inclusive() {
        let rule = rule_for("RX_ADH").unwrap();
        assert_eq!(rule.interventions(0.8).len(), 3);
        assert!(rule.interventions(0.95).is_empty());
    }

    #[test]
    fn test_derived_features_have_no_rule() {
        assert!(rule_for("CLAIMS_FLAG").is_none());
        assert!(rule_for("COMOR_COUNT").is_none());
    }

    #[test]
    fn test_general_recommendations_never_empty() {
        for score in [0u8, 39, 40, 59, 60, 79, 80, 100] {
            assert!(!general_recommendations(score).is_empty());
        }
    }
}
