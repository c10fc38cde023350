/// Loader placed first in the deployment archive. At cold start it extracts the
/// bundled dependencies to a temporary directory and puts them on `sys.path`.
pub fn bootstrap_script(archive_file: &str) -> String {
    format!(
        r#"#!/usr/bin/env python3
import os
import shutil
import sys
import zipfile

pkgdir = '/tmp/sls-py-req'

sys.path.insert(1, pkgdir)

if not os.path.exists(pkgdir):
    tempdir = '/tmp/_temp-sls-py-req'
    if os.path.exists(tempdir):
        shutil.rmtree(tempdir)

    default_lambda_task_root = os.environ.get('LAMBDA_TASK_ROOT', os.getcwd())
    lambda_task_root = os.getcwd() if os.environ.get('IS_LOCAL') == 'true' else default_lambda_task_root
    zip_requirements = os.path.join(lambda_task_root, '{archive_file}')

    zipfile.ZipFile(zip_requirements, 'r').extractall(tempdir)
    os.rename(tempdir, pkgdir)
"#
    )
}
